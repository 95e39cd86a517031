//! User CRUD service. Same shape as the group service, with inline
//! validation (users carry no scene-specific rules).

use std::sync::Arc;

use serde_json::{json, Value};

use crate::audit::TraceLog;
use crate::http::response::ApiError;
use crate::paging::{Page, PageRequest};
use crate::users::store::{NewUser, UserRecord, UserStore};

pub struct UserService {
    store: Arc<dyn UserStore>,
    traces: Arc<TraceLog>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, traces: Arc<TraceLog>) -> Self {
        Self { store, traces }
    }

    pub fn create(&self, actor: u64, payload: &Value) -> Result<UserRecord, ApiError> {
        let name = required_name(payload)?;
        if self.store.get_by_name(&name).is_some() {
            return Err(ApiError::Conflict(format!("user already exists: {name}")));
        }

        let record = self.store.create(NewUser {
            name,
            nickname: optional_string(payload, "nickname"),
            group_ids: group_ids(payload)?,
            actor,
        });
        self.traces.record(
            "user.create",
            json!({ "id": record.id, "name": record.name, "actor": actor }),
        );
        Ok(record)
    }

    pub fn update(&self, actor: u64, id: u64, payload: &Value) -> Result<UserRecord, ApiError> {
        let name = required_name(payload)?;
        let mut record = self.store.get(id).ok_or(ApiError::NotFound("user"))?;

        if let Some(existing) = self.store.get_by_name(&name) {
            if existing.id != id {
                return Err(ApiError::Conflict(format!("user already exists: {name}")));
            }
        }

        record.name = name;
        record.nickname = optional_string(payload, "nickname");
        record.group_ids = group_ids(payload)?;
        record.update_user_id = actor;

        if !self.store.save(record.clone()) {
            return Err(ApiError::NotFound("user"));
        }
        self.traces
            .record("user.update", json!({ "id": id, "actor": actor }));
        Ok(record)
    }

    pub fn modify(&self, actor: u64, id: u64, payload: &Value) -> Result<UserRecord, ApiError> {
        let mut record = self.store.get(id).ok_or(ApiError::NotFound("user"))?;

        if let Some(name) = payload.get("name").and_then(Value::as_str) {
            let name = name.trim();
            if name.is_empty() {
                return Err(ApiError::Invalid("name must not be empty".into()));
            }
            if let Some(existing) = self.store.get_by_name(name) {
                if existing.id != id {
                    return Err(ApiError::Conflict(format!("user already exists: {name}")));
                }
            }
            record.name = name.to_string();
        }
        if let Some(nickname) = payload.get("nickname").and_then(Value::as_str) {
            record.nickname = nickname.to_string();
        }
        if payload.get("group_ids").is_some() {
            record.group_ids = group_ids(payload)?;
        }
        record.update_user_id = actor;

        if !self.store.save(record.clone()) {
            return Err(ApiError::NotFound("user"));
        }
        self.traces
            .record("user.modify", json!({ "id": id, "actor": actor }));
        Ok(record)
    }

    pub fn delete(&self, id: u64) -> Result<(), ApiError> {
        if self.store.get(id).is_none() {
            return Err(ApiError::NotFound("user"));
        }
        self.store.delete(id);
        self.traces.record("user.delete", json!({ "id": id }));
        Ok(())
    }

    pub fn get(&self, id: u64) -> Result<UserRecord, ApiError> {
        self.store.get(id).ok_or(ApiError::NotFound("user"))
    }

    pub fn search(&self, name_like: Option<&str>, page: PageRequest) -> Page<UserRecord> {
        self.store.search(name_like, page)
    }
}

fn required_name(payload: &Value) -> Result<String, ApiError> {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::Invalid("name is required".into()));
    }
    Ok(name.to_string())
}

fn optional_string(payload: &Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn group_ids(payload: &Value) -> Result<Vec<u64>, ApiError> {
    match payload.get("group_ids") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_u64()
                    .ok_or_else(|| ApiError::Invalid("group_ids must be numeric ids".into()))
            })
            .collect(),
        Some(_) => Err(ApiError::Invalid("group_ids must be an array".into())),
    }
}
