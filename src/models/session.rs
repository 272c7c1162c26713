/// Where a user is in the `/start` → city name conversation.
///
/// Users the store has never seen are `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingCity,
}

impl SessionState {
    pub fn is_awaiting_city(self) -> bool {
        matches!(self, SessionState::AwaitingCity)
    }
}
