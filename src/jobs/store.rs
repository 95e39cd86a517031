//! Job persistence interface and in-memory implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::jobs::record::{JobRecord, NewJob};
use crate::paging::{Page, PageRequest};

pub trait JobStore: Send + Sync {
    fn create(&self, new: NewJob) -> JobRecord;
    fn get(&self, id: u64) -> Option<JobRecord>;
    fn get_by_name(&self, name: &str) -> Option<JobRecord>;
    fn save(&self, record: JobRecord) -> bool;
    fn delete(&self, id: u64) -> bool;
    /// Search by name substring and/or enabled flag.
    fn search(
        &self,
        name_like: Option<&str>,
        status: Option<bool>,
        page: PageRequest,
    ) -> Page<JobRecord>;
}

#[derive(Default)]
pub struct MemoryJobStore {
    rows: DashMap<u64, JobRecord>,
    next_id: AtomicU64,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobStore for MemoryJobStore {
    fn create(&self, new: NewJob) -> JobRecord {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let record = JobRecord {
            id,
            name: new.name,
            expression: new.expression,
            args: new.args,
            status: new.status,
            create_user_id: new.actor,
            update_user_id: new.actor,
        };
        self.rows.insert(id, record.clone());
        record
    }

    fn get(&self, id: u64) -> Option<JobRecord> {
        self.rows.get(&id).map(|row| row.value().clone())
    }

    fn get_by_name(&self, name: &str) -> Option<JobRecord> {
        self.rows
            .iter()
            .find(|row| row.value().name == name)
            .map(|row| row.value().clone())
    }

    fn save(&self, record: JobRecord) -> bool {
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

    fn search(
        &self,
        name_like: Option<&str>,
        status: Option<bool>,
        page: PageRequest,
    ) -> Page<JobRecord> {
        let mut matches: Vec<JobRecord> = self
            .rows
            .iter()
            .filter(|row| {
                name_like.is_none_or(|needle| row.value().name.contains(needle))
                    && status.is_none_or(|wanted| row.value().status == wanted)
            })
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seed(store: &MemoryJobStore, name: &str, status: bool) -> JobRecord {
        store.create(NewJob {
            name: name.to_string(),
            expression: "0 * * * *".to_string(),
            args: json!({}),
            status,
            actor: 1,
        })
    }

    #[test]
    fn search_filters_by_status() {
        let store = MemoryJobStore::new();
        seed(&store, "sync-users", true);
        seed(&store, "sync-groups", false);
        seed(&store, "rebuild-index", true);

        let page = store.search(
            None,
            Some(true),
            PageRequest {
                offset: 0,
                limit: 10,
            },
        );
        assert_eq!(page.paging.total, 2);

        let page = store.search(
            Some("sync"),
            Some(false),
            PageRequest {
                offset: 0,
                limit: 10,
            },
        );
        assert_eq!(page.paging.total, 1);
        assert_eq!(page.data[0].name, "sync-groups");
    }
}
