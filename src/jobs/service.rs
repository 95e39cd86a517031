//! Job record CRUD service.
//!
//! Stores schedule-shaped job records; it never executes them. Execution
//! belongs to whatever scheduler consumes the store.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::audit::TraceLog;
use crate::http::response::ApiError;
use crate::jobs::record::{JobRecord, NewJob};
use crate::jobs::store::JobStore;
use crate::paging::{Page, PageRequest};

pub struct JobService {
    store: Arc<dyn JobStore>,
    traces: Arc<TraceLog>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>, traces: Arc<TraceLog>) -> Self {
        Self { store, traces }
    }

    pub fn create(&self, actor: u64, payload: &Value) -> Result<JobRecord, ApiError> {
        let (name, expression) = required_fields(payload)?;
        if self.store.get_by_name(&name).is_some() {
            return Err(ApiError::Conflict(format!("job already exists: {name}")));
        }

        let record = self.store.create(NewJob {
            name,
            expression,
            args: payload.get("args").cloned().unwrap_or(Value::Null),
            status: payload.get("status").and_then(Value::as_bool).unwrap_or(true),
            actor,
        });
        self.traces.record(
            "job.create",
            json!({ "id": record.id, "name": record.name, "actor": actor }),
        );
        Ok(record)
    }

    pub fn update(&self, actor: u64, id: u64, payload: &Value) -> Result<JobRecord, ApiError> {
        let (name, expression) = required_fields(payload)?;
        let mut record = self.store.get(id).ok_or(ApiError::NotFound("job"))?;

        if let Some(existing) = self.store.get_by_name(&name) {
            if existing.id != id {
                return Err(ApiError::Conflict(format!("job already exists: {name}")));
            }
        }

        record.name = name;
        record.expression = expression;
        record.args = payload.get("args").cloned().unwrap_or(Value::Null);
        record.status = payload.get("status").and_then(Value::as_bool).unwrap_or(true);
        record.update_user_id = actor;

        if !self.store.save(record.clone()) {
            return Err(ApiError::NotFound("job"));
        }
        self.traces
            .record("job.update", json!({ "id": id, "actor": actor }));
        Ok(record)
    }

    /// Partial update; the common case is toggling `status`.
    pub fn modify(&self, actor: u64, id: u64, payload: &Value) -> Result<JobRecord, ApiError> {
        let mut record = self.store.get(id).ok_or(ApiError::NotFound("job"))?;

        if let Some(name) = payload.get("name").and_then(Value::as_str) {
            let name = name.trim();
            if name.is_empty() {
                return Err(ApiError::Invalid("name must not be empty".into()));
            }
            if let Some(existing) = self.store.get_by_name(name) {
                if existing.id != id {
                    return Err(ApiError::Conflict(format!("job already exists: {name}")));
                }
            }
            record.name = name.to_string();
        }
        if let Some(expression) = payload.get("expression").and_then(Value::as_str) {
            record.expression = expression.to_string();
        }
        if let Some(args) = payload.get("args") {
            record.args = args.clone();
        }
        if let Some(status) = payload.get("status").and_then(Value::as_bool) {
            record.status = status;
        }
        record.update_user_id = actor;

        if !self.store.save(record.clone()) {
            return Err(ApiError::NotFound("job"));
        }
        self.traces
            .record("job.modify", json!({ "id": id, "actor": actor }));
        Ok(record)
    }

    pub fn delete(&self, id: u64) -> Result<(), ApiError> {
        if self.store.get(id).is_none() {
            return Err(ApiError::NotFound("job"));
        }
        self.store.delete(id);
        self.traces.record("job.delete", json!({ "id": id }));
        Ok(())
    }

    pub fn get(&self, id: u64) -> Result<JobRecord, ApiError> {
        self.store.get(id).ok_or(ApiError::NotFound("job"))
    }

    pub fn search(
        &self,
        name_like: Option<&str>,
        status: Option<bool>,
        page: PageRequest,
    ) -> Page<JobRecord> {
        self.store.search(name_like, status, page)
    }
}

fn required_fields(payload: &Value) -> Result<(String, String), ApiError> {
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ApiError::Invalid("name is required".into()));
    }
    let expression = payload
        .get("expression")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if expression.is_empty() {
        return Err(ApiError::Invalid("expression is required".into()));
    }
    Ok((name.to_string(), expression.to_string()))
}
