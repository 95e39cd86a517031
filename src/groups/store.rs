//! Group persistence interface and in-memory implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::paging::{Page, PageRequest};

/// Stored user-group record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupRecord {
    pub id: u64,
    pub name: String,
    /// Opaque rule identifiers attached to the group.
    pub rules: Vec<String>,
    pub create_user_id: u64,
    pub update_user_id: u64,
}

/// Fields accepted when creating a group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub rules: Vec<String>,
    pub actor: u64,
}

/// Narrow persistence interface for groups. The backing schema is a
/// deployment concern; only these capabilities are part of the contract.
pub trait GroupStore: Send + Sync {
    fn create(&self, new: NewGroup) -> GroupRecord;
    fn get(&self, id: u64) -> Option<GroupRecord>;
    fn get_by_name(&self, name: &str) -> Option<GroupRecord>;
    /// Replace an existing record. Returns false when the id is unknown.
    fn save(&self, record: GroupRecord) -> bool;
    fn delete(&self, id: u64) -> bool;
    /// Search with an optional name-substring condition.
    fn search(&self, name_like: Option<&str>, page: PageRequest) -> Page<GroupRecord>;
}

/// DashMap-backed store; id assignment is a process-local counter.
#[derive(Default)]
pub struct MemoryGroupStore {
    rows: DashMap<u64, GroupRecord>,
    next_id: AtomicU64,
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupStore for MemoryGroupStore {
    fn create(&self, new: NewGroup) -> GroupRecord {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let record = GroupRecord {
            id,
            name: new.name,
            rules: new.rules,
            create_user_id: new.actor,
            update_user_id: new.actor,
        };
        self.rows.insert(id, record.clone());
        record
    }

    fn get(&self, id: u64) -> Option<GroupRecord> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    fn get_by_name(&self, name: &str) -> Option<GroupRecord> {
        self.rows
            .iter()
            .find(|row| row.value().name == name)
            .map(|row| row.value().clone())
    }

    fn save(&self, record: GroupRecord) -> bool {
        match self.rows.get_mut(&record.id) {
            Some(mut row) => {
                *row = record;
                true
            }
            None => false,
        }
    }

    fn delete(&self, id: u64) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn search(&self, name_like: Option<&str>, page: PageRequest) -> Page<GroupRecord> {
        let mut matches: Vec<GroupRecord> = self
            .rows
            .iter()
            .filter(|row| name_like.is_none_or(|needle| row.value().name.contains(needle)))
            .map(|row| row.value().clone())
            .collect();
        matches.sort_by_key(|record| record.id);

        let total = matches.len();
        let data = matches
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();
        Page::new(data, total, page)
    }
}
