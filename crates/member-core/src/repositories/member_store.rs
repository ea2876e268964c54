//! Member store trait (port)

use async_trait::async_trait;
use member_shared::MemberId;

use crate::domain::MemberRecord;
use crate::error::DomainError;

/// Persistence for member records.
///
/// Implementations must enforce email uniqueness atomically at write time and
/// report a collision as [`DomainError::DuplicateEmail`]. Lookups that find
/// nothing return `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Inserts when `record.id` is `None`, otherwise updates the record with
    /// that id in place. An id with no stored record is inserted as new under
    /// a store-assigned id; the caller's id is not reused. Returns the stored
    /// record with its id populated.
    async fn save(&self, record: &MemberRecord) -> Result<MemberRecord, DomainError>;

    async fn find_by_id(&self, id: MemberId) -> Result<Option<MemberRecord>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<MemberRecord>, DomainError>;

    async fn find_all(&self) -> Result<Vec<MemberRecord>, DomainError>;

    /// Removing an unknown id is a no-op.
    async fn delete_by_id(&self, id: MemberId) -> Result<(), DomainError>;
}
