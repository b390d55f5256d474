use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::IdentityProvider;
use crate::framework::StoreError;
use crate::model::{ActorId, SessionToken};

/// In-memory session table standing in for the external identity provider.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    sessions: RwLock<HashMap<SessionToken, ActorId>>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `token` to `actor`, replacing any previous binding.
    pub async fn sign_in(&self, token: SessionToken, actor: ActorId) {
        debug!(%actor, "Session bound");
        self.sessions.write().await.insert(token, actor);
    }

    pub async fn sign_out(&self, token: &SessionToken) {
        self.sessions.write().await.remove(token);
    }
}

#[async_trait]
impl IdentityProvider for SessionDirectory {
    async fn resolve(&self, session: &SessionToken) -> Result<Option<ActorId>, StoreError> {
        Ok(self.sessions.read().await.get(session).cloned())
    }
}
