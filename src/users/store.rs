//! User persistence interface and in-memory implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::paging::{Page, PageRequest};

/// Stored user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub nickname: String,
    /// Group memberships by group id.
    pub group_ids: Vec<u64>,
    pub create_user_id: u64,
    pub update_user_id: u64,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub nickname: String,
    pub group_ids: Vec<u64>,
    pub actor: u64,
}

pub trait UserStore: Send + Sync {
    fn create(&self, new: NewUser) -> UserRecord;
    fn get(&self, id: u64) -> Option<UserRecord>;
    fn get_by_name(&self, name: &str) -> Option<UserRecord>;
    fn save(&self, record: UserRecord) -> bool;
    fn delete(&self, id: u64) -> bool;
    fn search(&self, name_like: Option<&str>, page: PageRequest) -> Page<UserRecord>;
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: DashMap<u64, UserRecord>,
    next_id: AtomicU64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryUserStore {
    fn create(&self, new: NewUser) -> UserRecord {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let record = UserRecord {
            id,
            name: new.name,
            nickname: new.nickname,
            group_ids: new.group_ids,
            create_user_id: new.actor,
            update_user_id: new.actor,
        };
        self.rows.insert(id, record.clone());
        record
    }

    fn get(&self, id: u64) -> Option<UserRecord> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    fn get_by_name(&self, name: &str) -> Option<UserRecord> {
        self.rows
            .iter()
            .find(|row| row.value().name == name)
            .map(|row| row.value().clone())
    }

    fn save(&self, record: UserRecord) -> bool {
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

    fn search(&self, name_like: Option<&str>, page: PageRequest) -> Page<UserRecord> {
        let mut matches: Vec<UserRecord> = self
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
