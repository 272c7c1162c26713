use teloxide::{prelude::*, utils::command::BotCommands};
use std::sync::Arc;

mod bot_state;
mod config;
mod handlers;
mod models;
mod responder;
mod weather;

use crate::bot_state::{BotState, InMemorySessionStore};
use crate::config::Config;
use crate::handlers::{callback_handler, command_handler, message_handler};
use crate::weather::OpenWeatherClient;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
enum Command {
    #[command(description = "look up the temperature of a city")]
    Start,
    #[command(description = "show help")]
    Help,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // .env is optional, real environment variables win
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,reqwest=warn,hyper=warn"),
    )
    .init();
    log::info!("Starting weather bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            return Err(e.into());
        }
    };
    log::debug!("Loaded {:?}", config);

    let weather = OpenWeatherClient::new(&config.weather_api_url, &config.weather_api_key);
    let state = BotState::new(Arc::new(InMemorySessionStore::new()), Arc::new(weather));

    let bot = Bot::new(&config.telegram_bot_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("Could not register bot commands: {}", e);
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler)
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler))
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
