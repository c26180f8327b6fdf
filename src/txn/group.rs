//! Atomic transaction groups.
//!
//! Members of a group share one set of suggested parameters and settle
//! all-or-nothing: the node rejects the whole group if any member is
//! invalid. The group id is computed over the members' ungrouped
//! encodings and stamped into every member before signing.

use sha2::{Digest, Sha512_256};
use thiserror::Error;

use crate::txn::builder::{GroupId, Transaction};

/// Maximum number of members the ledger accepts in one group.
pub const MAX_GROUP_SIZE: usize = 16;

/// Errors composing an atomic group.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("group has no members")]
    Empty,

    #[error("group of {0} exceeds the {MAX_GROUP_SIZE}-member limit")]
    TooLarge(usize),

    #[error("member already carries a group id")]
    AlreadyGrouped,
}

/// Ordered builder for an atomic group.
#[derive(Debug, Default)]
pub struct AtomicGroup {
    members: Vec<Transaction>,
}

impl AtomicGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a member. Fails if the member is pre-grouped or the group
    /// is full.
    pub fn add(&mut self, txn: Transaction) -> Result<(), GroupError> {
        if txn.group.is_some() {
            return Err(GroupError::AlreadyGrouped);
        }
        if self.members.len() == MAX_GROUP_SIZE {
            return Err(GroupError::TooLarge(self.members.len() + 1));
        }
        self.members.push(txn);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Stamp the group id and return the members ready for signing.
    ///
    /// Single-member groups are not stamped; a lone transaction needs no
    /// atomicity marker.
    pub fn seal(mut self) -> Result<Vec<Transaction>, GroupError> {
        if self.members.is_empty() {
            return Err(GroupError::Empty);
        }
        if self.members.len() > 1 {
            let gid = compute_group_id(&self.members);
            for member in &mut self.members {
                member.group = Some(gid);
            }
        }
        Ok(self.members)
    }
}

/// Group id: SHA-512/256 over the domain-separated member encodings.
fn compute_group_id(members: &[Transaction]) -> GroupId {
    let mut hasher = Sha512_256::new();
    hasher.update(b"TG");
    for member in members {
        hasher.update(member.encode());
    }
    GroupId(hasher.finalize().into())
}
