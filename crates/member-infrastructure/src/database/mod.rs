//! Database module (store adapters)

pub mod connection;
pub mod memory;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use memory::InMemoryMemberStore;
pub use postgres::PgMemberStore;

use std::sync::Arc;

use anyhow::Context;
use member_core::MemberStore;
use member_shared::config::{DatabaseSettings, StorageBackend};
use tracing::{info, warn};

/// Builds the member store selected by `database.backend`.
pub async fn open_store(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn MemberStore>> {
    match settings.backend {
        StorageBackend::Postgres => {
            info!("Connecting to member database...");
            let pool = create_pool(settings)
                .await
                .context("failed to connect to member database")?;
            if settings.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("failed to apply member migrations")?;
            }
            info!("Database connection established.");
            Ok(Arc::new(PgMemberStore::new(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory member store; data is lost on restart");
            Ok(Arc::new(InMemoryMemberStore::new()))
        }
    }
}
