//! Group CRUD service.
//!
//! # Responsibilities
//! - Scene-validate write payloads
//! - Enforce group-name uniqueness
//! - Restrict updates to the updatable fields (`name`, `rules`)
//! - Stamp the acting user onto created/updated records
//! - Record an audit trace for every mutation

use std::sync::Arc;

use serde_json::{json, Value};

use crate::audit::TraceLog;
use crate::groups::store::{GroupRecord, GroupStore, NewGroup};
use crate::groups::validator::{GroupValidator, Scene};
use crate::http::response::ApiError;
use crate::paging::{Page, PageRequest};

pub struct GroupService {
    store: Arc<dyn GroupStore>,
    traces: Arc<TraceLog>,
}

impl GroupService {
    pub fn new(store: Arc<dyn GroupStore>, traces: Arc<TraceLog>) -> Self {
        Self { store, traces }
    }

    pub fn create(&self, actor: u64, payload: &Value) -> Result<GroupRecord, ApiError> {
        let input = GroupValidator::scene(Scene::Create).check(payload)?;

        if self.store.get_by_name(&input.name).is_some() {
            return Err(ApiError::Conflict(format!(
                "group already exists: {}",
                input.name
            )));
        }

        let record = self.store.create(NewGroup {
            name: input.name,
            rules: input.rules,
            actor,
        });
        self.traces.record(
            "group.create",
            json!({ "id": record.id, "name": record.name, "actor": actor }),
        );
        Ok(record)
    }

    pub fn update(&self, actor: u64, id: u64, payload: &Value) -> Result<GroupRecord, ApiError> {
        let input = GroupValidator::scene(Scene::Update).check(payload)?;

        let mut record = self.store.get(id).ok_or(ApiError::NotFound("group"))?;
        self.check_name(id, &input.name)?;

        // Only name and rules are updatable through this path.
        record.name = input.name;
        record.rules = input.rules;
        record.update_user_id = actor;

        if !self.store.save(record.clone()) {
            return Err(ApiError::NotFound("group"));
        }
        self.traces
            .record("group.update", json!({ "id": id, "actor": actor }));
        Ok(record)
    }

    /// Partial update: only the provided updatable fields change.
    pub fn modify(&self, actor: u64, id: u64, payload: &Value) -> Result<GroupRecord, ApiError> {
        let mut record = self.store.get(id).ok_or(ApiError::NotFound("group"))?;

        if payload.get("name").is_some() || payload.get("rules").is_some() {
            // Reuse the scene rules for whichever fields are present,
            // defaulting absent ones to the current values.
            let merged = json!({
                "name": payload.get("name").and_then(Value::as_str).unwrap_or(&record.name),
                "rules": payload.get("rules").cloned().unwrap_or_else(|| json!(record.rules)),
            });
            let input = GroupValidator::scene(Scene::Update).check(&merged)?;
            if input.name != record.name {
                self.check_name(id, &input.name)?;
            }
            record.name = input.name;
            record.rules = input.rules;
        }
        record.update_user_id = actor;

        if !self.store.save(record.clone()) {
            return Err(ApiError::NotFound("group"));
        }
        self.traces
            .record("group.modify", json!({ "id": id, "actor": actor }));
        Ok(record)
    }

    pub fn delete(&self, id: u64) -> Result<(), ApiError> {
        if self.store.get(id).is_none() {
            return Err(ApiError::NotFound("group"));
        }
        self.store.delete(id);
        self.traces.record("group.delete", json!({ "id": id }));
        Ok(())
    }

    pub fn get(&self, id: u64) -> Result<GroupRecord, ApiError> {
        self.store.get(id).ok_or(ApiError::NotFound("group"))
    }

    pub fn search(&self, name_like: Option<&str>, page: PageRequest) -> Page<GroupRecord> {
        self.store.search(name_like, page)
    }

    /// Reject a name already taken by a different group.
    fn check_name(&self, id: u64, name: &str) -> Result<(), ApiError> {
        match self.store.get_by_name(name) {
            Some(existing) if existing.id != id => Err(ApiError::Conflict(format!(
                "group already exists: {name}"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::store::MemoryGroupStore;

    fn service() -> GroupService {
        GroupService::new(
            Arc::new(MemoryGroupStore::new()),
            Arc::new(TraceLog::default()),
        )
    }

    #[test]
    fn create_rejects_duplicate_name() {
        let service = service();
        service.create(1, &json!({ "name": "ops" })).expect("first");
        let err = service
            .create(1, &json!({ "name": "ops" }))
            .expect_err("duplicate");
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn create_stamps_actor() {
        let service = service();
        let record = service.create(7, &json!({ "name": "ops" })).expect("ok");
        assert_eq!(record.create_user_id, 7);
        assert_eq!(record.update_user_id, 7);
    }

    #[test]
    fn update_restricts_fields_and_checks_conflicts() {
        let service = service();
        let a = service.create(1, &json!({ "name": "ops" })).expect("a");
        service.create(1, &json!({ "name": "dev" })).expect("b");

        // Renaming onto another group's name conflicts.
        let err = service
            .update(2, a.id, &json!({ "name": "dev" }))
            .expect_err("conflict");
        assert!(matches!(err, ApiError::Conflict(_)));

        // Same name on the same record is allowed; actor is restamped.
        let updated = service
            .update(2, a.id, &json!({ "name": "ops", "rules": ["r1"] }))
            .expect("ok");
        assert_eq!(updated.rules, ["r1"]);
        assert_eq!(updated.update_user_id, 2);
        assert_eq!(updated.create_user_id, 1);
    }

    #[test]
    fn modify_merges_partial_payloads() {
        let service = service();
        let record = service
            .create(1, &json!({ "name": "ops", "rules": ["r1"] }))
            .expect("create");

        let modified = service
            .modify(3, record.id, &json!({ "rules": ["r2"] }))
            .expect("modify");
        assert_eq!(modified.name, "ops");
        assert_eq!(modified.rules, ["r2"]);
        assert_eq!(modified.update_user_id, 3);
    }

    #[test]
    fn delete_and_get_report_missing_records() {
        let service = service();
        assert!(matches!(
            service.get(9).expect_err("missing"),
            ApiError::NotFound("group")
        ));
        assert!(matches!(
            service.delete(9).expect_err("missing"),
            ApiError::NotFound("group")
        ));

        let record = service.create(1, &json!({ "name": "ops" })).expect("ok");
        service.delete(record.id).expect("deleted");
        assert!(service.get(record.id).is_err());
    }

    #[test]
    fn mutations_record_traces() {
        let store = Arc::new(MemoryGroupStore::new());
        let traces = Arc::new(TraceLog::default());
        let service = GroupService::new(store, traces.clone());

        let record = service.create(1, &json!({ "name": "ops" })).expect("ok");
        service.delete(record.id).expect("deleted");

        let messages: Vec<String> = traces
            .recent(10)
            .into_iter()
            .map(|entry| entry.message)
            .collect();
        assert_eq!(messages, ["group.create", "group.delete"]);
    }
}
