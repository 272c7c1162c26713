pub mod commands;
pub mod messages;
pub mod callbacks;
pub mod utils;

pub use commands::command_handler;
pub use messages::message_handler;
pub use callbacks::callback_handler;

#[cfg(test)]
pub(crate) mod test_support;
