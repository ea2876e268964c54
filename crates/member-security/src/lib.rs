//! # Member Security
//! 
//! Server-side login sessions keyed by opaque tokens.

pub mod session;

pub use session::{Session, SessionError, SessionStore};
