use crate::core::{Clock, Result, SystemClock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Identity bound to a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub created_at: i64,
}

/// How session tokens are minted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStrategy {
    /// `token_{user_id}_{unix_seconds}`; unique in practice, trivially guessable
    #[default]
    Timestamped,
    /// `token_{uuid}` from a random v4 UUID
    Random,
}

impl FromStr for TokenStrategy {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "timestamped" | "timestamp" => Ok(Self::Timestamped),
            "random" | "uuid" => Ok(Self::Random),
            other => Err(format!(
                "unknown session token strategy '{}', expected one of: timestamped, random",
                other
            )),
        }
    }
}

/// In-memory session store
///
/// Sessions live until explicitly deleted or the process exits.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
    strategy: TokenStrategy,
    clock: Arc<dyn Clock>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(TokenStrategy::default())
    }
}

impl SessionRegistry {
    pub fn new(strategy: TokenStrategy) -> Self {
        Self::with_clock(strategy, Arc::new(SystemClock))
    }

    pub fn with_clock(strategy: TokenStrategy, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            strategy,
            clock,
        }
    }

    pub fn strategy(&self) -> TokenStrategy {
        self.strategy
    }

    /// Issues a token for the user and records the session
    pub fn create(&self, user_id: &str, user_name: &str) -> Result<String> {
        let now = self.clock.now();
        let token = match self.strategy {
            TokenStrategy::Timestamped => format!("token_{}_{}", user_id, now),
            TokenStrategy::Random => format!("token_{}", Uuid::new_v4().simple()),
        };

        let session = Session {
            user_id: user_id.to_string(),
            name: user_name.to_string(),
            created_at: now,
        };
        self.sessions.lock()?.insert(token.clone(), session);
        Ok(token)
    }

    pub fn get(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.lock()?.get(token).cloned())
    }

    /// Removes the session; unknown tokens are ignored
    pub fn delete(&self, token: &str) -> Result<()> {
        self.sessions.lock()?.remove(token);
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.sessions.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
