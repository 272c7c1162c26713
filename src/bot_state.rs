use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use teloxide::types::UserId;
use tokio::sync::RwLock;

use crate::models::SessionState;
use crate::responder::{
    self, Lookup, OutgoingMessage, TemperatureResponder, CITY_NOT_FOUND, LOOKUP_FAILED,
    START_REMINDER,
};
use crate::weather::WeatherProvider;

/// Per-user conversation state. Absent users read as `Idle`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: UserId) -> SessionState;
    async fn set(&self, user_id: UserId, state: SessionState);
    async fn delete(&self, user_id: UserId);

    /// Returns the state and removes the entry. Implementations shared
    /// between tasks should do this under a single lock.
    async fn take(&self, user_id: UserId) -> SessionState {
        let state = self.get(user_id).await;
        self.delete(user_id).await;
        state
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<UserId, SessionState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: UserId) -> SessionState {
        let sessions = self.sessions.read().await;
        sessions.get(&user_id).copied().unwrap_or_default()
    }

    async fn set(&self, user_id: UserId, state: SessionState) {
        let mut sessions = self.sessions.write().await;
        match state {
            SessionState::Idle => sessions.remove(&user_id),
            SessionState::AwaitingCity => sessions.insert(user_id, state),
        };
    }

    async fn delete(&self, user_id: UserId) {
        self.sessions.write().await.remove(&user_id);
    }

    async fn take(&self, user_id: UserId) -> SessionState {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&user_id).unwrap_or_default()
    }
}

/// Decides whether free text from a user is a city name.
#[derive(Clone)]
pub struct SessionGate {
    store: Arc<dyn SessionStore>,
}

impl SessionGate {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn mark_awaiting(&self, user_id: UserId) {
        self.store.set(user_id, SessionState::AwaitingCity).await;
    }

    /// True at most once per `mark_awaiting`.
    pub async fn consume_if_awaiting(&self, user_id: UserId) -> bool {
        self.store.take(user_id).await.is_awaiting_city()
    }
}

#[derive(Clone)]
pub struct BotState {
    gate: SessionGate,
    responder: TemperatureResponder,
}

impl BotState {
    pub fn new(sessions: Arc<dyn SessionStore>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self {
            gate: SessionGate::new(sessions),
            responder: TemperatureResponder::new(weather),
        }
    }

    pub async fn start(&self, user_id: UserId) {
        self.gate.mark_awaiting(user_id).await;
        log::debug!("User {} is now awaiting a city", user_id.0);
    }

    /// Handles free text. The session is consumed whatever the lookup outcome.
    pub async fn handle_text(&self, user_id: UserId, text: &str) -> Vec<OutgoingMessage> {
        if !self.gate.consume_if_awaiting(user_id).await {
            return vec![OutgoingMessage::plain(START_REMINDER)];
        }

        log::debug!("🔎 Looking up weather for {:?} (user {})", text, user_id.0);

        match self.responder.lookup_city(text).await {
            Ok(Lookup::Found(reading)) => vec![
                responder::city_accepted(&reading.city),
                responder::render_initial(&reading),
            ],
            Ok(Lookup::NotFound) => {
                log::info!("City {:?} not found (user {})", text, user_id.0);
                vec![OutgoingMessage::plain(CITY_NOT_FOUND)]
            }
            Err(e) => {
                log::error!("Weather lookup for {:?} failed: {:#}", text, e);
                vec![OutgoingMessage::plain(LOOKUP_FAILED)]
            }
        }
    }
}
