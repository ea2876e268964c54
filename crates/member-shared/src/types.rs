//! Common types

/// Server-assigned identity of a member record.
pub type MemberId = i64;
