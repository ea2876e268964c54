//! # Member Core - Domain Module
//! 
//! The persisted member record and its boundary transfer object.

pub mod member;

pub use member::{MemberDto, MemberRecord};
