//! In-memory member store
//!
//! Keeps records in a `BTreeMap` behind one lock so the email uniqueness check
//! and the write happen atomically, the same guarantee the `UNIQUE` constraint
//! gives the Postgres store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info};

use member_core::domain::MemberRecord;
use member_core::error::DomainError;
use member_core::repositories::MemberStore;
use member_shared::MemberId;

#[derive(Default)]
struct Inner {
    last_id: MemberId,
    members: BTreeMap<MemberId, MemberRecord>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<MemberId>) -> bool {
        self.members
            .values()
            .any(|m| m.email == email && m.id != except)
    }

    fn next_id(&mut self) -> MemberId {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct InMemoryMemberStore {
    inner: RwLock<Inner>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn save(&self, record: &MemberRecord) -> Result<MemberRecord, DomainError> {
        let mut inner = self.inner.write();

        let existing = record.id.filter(|id| inner.members.contains_key(id));
        if inner.email_taken(&record.email, existing) {
            return Err(DomainError::DuplicateEmail(record.email.clone()));
        }

        let id = match existing {
            Some(id) => {
                debug!("Updating member {} in place", id);
                id
            }
            None => {
                let id = inner.next_id();
                info!("Member created successfully: {}", id);
                id
            }
        };

        let stored = MemberRecord {
            id: Some(id),
            ..record.clone()
        };
        inner.members.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<MemberRecord>, DomainError> {
        Ok(self.inner.read().members.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<MemberRecord>, DomainError> {
        Ok(self
            .inner
            .read()
            .members
            .values()
            .find(|m| m.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<MemberRecord>, DomainError> {
        Ok(self.inner.read().members.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: MemberId) -> Result<(), DomainError> {
        self.inner.write().members.remove(&id);
        Ok(())
    }
}
