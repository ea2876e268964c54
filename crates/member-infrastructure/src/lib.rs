//! # Member Infrastructure
//! 
//! Member store implementations (adapters) and database bootstrapping.

pub mod database;

pub use database::{create_pool, open_store, run_migrations, InMemoryMemberStore, PgMemberStore};
