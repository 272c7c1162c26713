use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};
use std::error::Error;

use crate::models::ToggleRequest;
use crate::responder::OutgoingMessage;

/// Telegram rejects callback data longer than this.
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// Reply keyboard with a single /start button under the input field
pub fn start_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new("/start")]]).resize_keyboard()
}

/// Unit toggle button. `None` when the payload does not fit into callback data.
pub fn toggle_keyboard(toggle: &ToggleRequest) -> Option<InlineKeyboardMarkup> {
    let data = match toggle.encode() {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Could not encode toggle for {:?}: {}", toggle.city, e);
            return None;
        }
    };

    if data.len() > MAX_CALLBACK_DATA_LEN {
        log::warn!(
            "Toggle payload for {:?} is {} bytes, sending without button",
            toggle.city,
            data.len()
        );
        return None;
    }

    Some(InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback(toggle.label(), data),
    ]]))
}

pub async fn send_outgoing(
    bot: &Bot,
    chat_id: ChatId,
    message: &OutgoingMessage,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut request = bot.send_message(chat_id, &message.text);
    if let Some(keyboard) = message.toggle.as_ref().and_then(toggle_keyboard) {
        request = request.reply_markup(keyboard);
    }
    request.await?;
    Ok(())
}
