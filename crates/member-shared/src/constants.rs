//! Application-wide constants

pub const DEFAULT_APP_NAME: &str = "member-server";
pub const DEFAULT_SESSION_COOKIE: &str = "MEMBER_SESSION";
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 1800;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;
pub const SESSION_TOKEN_BYTES: usize = 32;
