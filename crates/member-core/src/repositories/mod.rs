//! Repository traits (ports)

pub mod member_store;

pub use member_store::MemberStore;

#[cfg(test)]
pub use member_store::MockMemberStore;
