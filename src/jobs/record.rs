//! Job record shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored job record.
///
/// `expression` is an opaque schedule expression and `args` an opaque
/// argument blob; this module stores records, it does not run them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRecord {
    pub id: u64,
    pub name: String,
    pub expression: String,
    pub args: Value,
    /// Enabled flag; disabled jobs stay stored but are marked inert.
    pub status: bool,
    pub create_user_id: u64,
    pub update_user_id: u64,
}

/// Fields accepted when creating a job record.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub name: String,
    pub expression: String,
    pub args: Value,
    pub status: bool,
    pub actor: u64,
}
