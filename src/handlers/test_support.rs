//! Telegram API stand-in for handler tests.

use serde_json::{json, Value};
use teloxide::prelude::*;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "1:x";

pub fn user_json(id: u64) -> Value {
    json!({ "id": id, "is_bot": false, "first_name": "Ann" })
}

pub fn private_message_json(user_id: u64, text: &str) -> Value {
    json!({
        "message_id": 10,
        "date": 1_700_000_000,
        "chat": { "id": user_id, "type": "private", "first_name": "Ann" },
        "from": user_json(user_id),
        "text": text
    })
}

pub fn message_from(value: Value) -> Message {
    serde_json::from_value(value).expect("valid message json")
}

/// Mock API that accepts sends, edits and callback answers.
pub async fn telegram_api() -> (MockServer, Bot) {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"/(SendMessage|EditMessageText)$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": private_message_json(42, "ok")
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"/AnswerCallbackQuery$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": true
        })))
        .mount(&server)
        .await;

    let url = reqwest::Url::parse(&server.uri()).expect("mock server url");
    let bot = Bot::new(TOKEN).set_api_url(url);
    (server, bot)
}

/// `(method, body)` of every API call, in order.
pub async fn api_calls(server: &MockServer) -> Vec<(String, Value)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|request| {
            let method = request
                .url
                .path()
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string();
            let body = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
            (method, body)
        })
        .collect()
}
