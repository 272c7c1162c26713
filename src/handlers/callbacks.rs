use teloxide::prelude::*;
use std::error::Error;

use crate::handlers::utils::toggle_keyboard;
use crate::responder::{self, OutgoingMessage};

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let edited = match q.data.as_deref().map(responder::handle_toggle) {
        Some(Ok(message)) => Some(message),
        Some(Err(e)) => {
            log::warn!("Ignoring button press from user {}: {}", q.from.id.0, e);
            None
        }
        None => None,
    };

    let result = match edited {
        Some(message) => edit_in_place(&bot, &q, &message).await,
        None => Ok(()),
    };

    // The client keeps a loading indicator until the press is answered.
    bot.answer_callback_query(q.id.clone()).await?;

    result
}

async fn edit_in_place(
    bot: &Bot,
    q: &CallbackQuery,
    message: &OutgoingMessage,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let keyboard = message.toggle.as_ref().and_then(toggle_keyboard);

    if let Some(ref original) = q.message {
        let mut request = bot.edit_message_text(original.chat().id, original.id(), &message.text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await?;
    } else if let Some(ref inline_message_id) = q.inline_message_id {
        let mut request = bot.edit_message_text_inline(inline_message_id, &message.text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{api_calls, private_message_json, telegram_api, user_json};
    use serde_json::json;

    fn button_press(data: &str) -> CallbackQuery {
        serde_json::from_value(json!({
            "id": "cb1",
            "from": user_json(42),
            "chat_instance": "ci",
            "message": private_message_json(42, "The temperature in London is 15.0°C"),
            "data": data
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn malformed_payload_is_only_acknowledged() {
        let (server, bot) = telegram_api().await;

        callback_handler(bot, button_press("garbage")).await.unwrap();

        let calls = api_calls(&server).await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "AnswerCallbackQuery");
        assert_eq!(calls[0].1["callback_query_id"], "cb1");
    }

    #[tokio::test]
    async fn overflowing_payload_is_only_acknowledged() {
        let (server, bot) = telegram_api().await;

        let press = button_press(r#"{"unit":"fahrenheit","value":1e308,"city":"London"}"#);
        callback_handler(bot, press).await.unwrap();

        let methods: Vec<_> = api_calls(&server).await.into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec!["AnswerCallbackQuery"]);
    }

    #[tokio::test]
    async fn toggle_edits_message_then_acknowledges() {
        let (server, bot) = telegram_api().await;

        let press = button_press(r#"{"unit":"fahrenheit","value":15.0,"city":"London"}"#);
        callback_handler(bot, press).await.unwrap();

        let calls = api_calls(&server).await;
        let methods: Vec<_> = calls.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(methods, vec!["EditMessageText", "AnswerCallbackQuery"]);

        let edit = &calls[0].1;
        assert_eq!(edit["chat_id"], 42);
        assert_eq!(edit["message_id"], 10);
        assert_eq!(edit["text"], "The temperature in London is 59.0°F");

        let button = &edit["reply_markup"]["inline_keyboard"][0][0];
        assert_eq!(button["text"], "Show in Celsius");
        let data = button["callback_data"].as_str().unwrap();
        assert_eq!(data, r#"{"unit":"celsius","value":59.0,"city":"London"}"#);
    }
}
