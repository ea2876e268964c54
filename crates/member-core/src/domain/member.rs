//! Member record (persistence shape) and member DTO (boundary shape)

use member_shared::MemberId;
use serde::{Deserialize, Serialize};

/// A member as the store keeps it. Only store implementations and the
/// directory handle this type; callers of the directory never see one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    /// `None` until the store assigns an identity.
    pub id: Option<MemberId>,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl MemberRecord {
    /// Record for a write that must create a new member. Any caller-supplied
    /// id is dropped.
    pub(crate) fn for_insert(dto: &MemberDto) -> Self {
        Self {
            id: None,
            email: dto.email.clone(),
            password: dto.password.clone(),
            name: dto.name.clone(),
        }
    }

    /// Record for an update. The supplied id is kept, so a missing id or one
    /// the store does not know results in an insert.
    pub(crate) fn for_update(dto: &MemberDto) -> Self {
        Self {
            id: dto.id,
            ..Self::for_insert(dto)
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// A member as exchanged with callers of the directory.
///
/// `password` is accepted on input but never serialized back out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDto {
    #[serde(default)]
    pub id: Option<MemberId>,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl MemberDto {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            password: password.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: MemberId) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<&MemberRecord> for MemberDto {
    fn from(record: &MemberRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            password: record.password.clone(),
            name: record.name.clone(),
        }
    }
}

impl From<MemberRecord> for MemberDto {
    fn from(record: MemberRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            password: record.password,
            name: record.name,
        }
    }
}
