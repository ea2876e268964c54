use std::sync::Arc;

use member_core::{MemberDirectory, MemberStore};
use member_security::{SessionError, SessionStore};
use member_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<MemberDirectory<dyn MemberStore>>,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn MemberStore>, config: AppConfig) -> Result<Self, SessionError> {
        let sessions = SessionStore::new(config.session.ttl_seconds)?;
        Ok(Self {
            directory: Arc::new(MemberDirectory::new(store)),
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        })
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.session.cookie_name
    }
}
