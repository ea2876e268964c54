//! # Member Core
//! 
//! Domain entities, the member store port, and the member directory service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use repositories::MemberStore;
pub use services::MemberDirectory;
