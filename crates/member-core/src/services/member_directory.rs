// ============================================================================
// Member Core - Member Directory Service
// File: crates/member-core/src/services/member_directory.rs
// ============================================================================
//! Registration, login, and CRUD over the member store

use std::sync::Arc;
use tracing::{debug, info, warn};

use member_shared::utils::mask_email;
use member_shared::MemberId;

use crate::domain::{MemberDto, MemberRecord};
use crate::error::DomainError;
use crate::repositories::MemberStore;

/// Member directory. Callers hand in and get back [`MemberDto`] values only;
/// conversion to and from [`MemberRecord`] happens here.
pub struct MemberDirectory<S: MemberStore + ?Sized> {
    store: Arc<S>,
}

impl<S: MemberStore + ?Sized> MemberDirectory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a new member. The email must not be in use; the store decides
    /// that atomically and the resulting `DuplicateEmail` is passed through.
    pub async fn register(&self, member: &MemberDto) -> Result<(), DomainError> {
        info!("Registration attempt for email: {}", mask_email(&member.email));

        let record = MemberRecord::for_insert(member);
        let saved = self.store.save(&record).await?;

        info!("Registration successful: member {:?}", saved.id);
        Ok(())
    }

    /// Check credentials and return the member on success.
    ///
    /// An unknown email and a wrong password both yield `Ok(None)`. The
    /// password is compared as stored plaintext; there is no hashing.
    pub async fn authenticate(
        &self,
        credentials: &MemberDto,
    ) -> Result<Option<MemberDto>, DomainError> {
        let masked = mask_email(&credentials.email);

        let Some(record) = self.store.find_by_email(&credentials.email).await? else {
            warn!("Login failed for: {}", masked);
            return Ok(None);
        };

        if record.password != credentials.password {
            warn!("Login failed for: {}", masked);
            return Ok(None);
        }

        info!("Login successful for: {}", masked);
        Ok(Some(MemberDto::from(record)))
    }

    /// Every member, in the order the store returns them.
    pub async fn list_all(&self) -> Result<Vec<MemberDto>, DomainError> {
        let records = self.store.find_all().await?;
        debug!("Listing {} members", records.len());
        Ok(records.into_iter().map(MemberDto::from).collect())
    }

    pub async fn find_by_id(&self, id: MemberId) -> Result<Option<MemberDto>, DomainError> {
        Ok(self.store.find_by_id(id).await?.map(MemberDto::from))
    }

    /// Resolve the member behind a session-carried email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<MemberDto>, DomainError> {
        Ok(self.store.find_by_email(email).await?.map(MemberDto::from))
    }

    /// Persist `member` under its own id (upsert). Ownership of that id is the
    /// caller's concern.
    pub async fn update(&self, member: &MemberDto) -> Result<(), DomainError> {
        let record = MemberRecord::for_update(member);
        if record.is_new() {
            debug!("Update without id for {}, inserting", mask_email(&member.email));
        }

        let saved = self.store.save(&record).await?;
        info!("Member {:?} updated", saved.id);
        Ok(())
    }

    pub async fn delete_by_id(&self, id: MemberId) -> Result<(), DomainError> {
        self.store.delete_by_id(id).await?;
        info!("Member {} deleted", id);
        Ok(())
    }
}
