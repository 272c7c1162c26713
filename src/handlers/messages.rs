use teloxide::prelude::*;
use std::error::Error;

use crate::bot_state::BotState;
use crate::handlers::utils::send_outgoing;

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Unknown commands end up here; they are not city names.
    if text.starts_with('/') {
        return Ok(());
    }

    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    for reply in state.handle_text(user.id, text).await {
        send_outgoing(&bot, msg.chat.id, &reply).await?;
    }

    Ok(())
}
