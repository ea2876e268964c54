//! PostgreSQL repository implementations

pub mod member_store_impl;

pub use member_store_impl::PgMemberStore;
