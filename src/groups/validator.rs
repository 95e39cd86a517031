//! Scene-based validation for group payloads.
//!
//! Validation is scoped per scene (create vs update), mirroring how the
//! services gate writes. Rule *content* is deliberately thin; the mechanism
//! (scene selection, first-error reporting) is the contract.

use serde_json::Value;

use crate::http::response::ApiError;

const MAX_NAME_LEN: usize = 64;

/// Validation scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Create,
    Update,
}

/// Validated group input fields.
#[derive(Debug, Clone)]
pub struct GroupInput {
    pub name: String,
    pub rules: Vec<String>,
}

/// Validator for group write payloads.
pub struct GroupValidator {
    scene: Scene,
}

impl GroupValidator {
    pub fn scene(scene: Scene) -> Self {
        Self { scene }
    }

    /// Check the payload against the scene's rules and extract the
    /// accepted fields. Unknown fields are ignored (the service restricts
    /// what it writes regardless).
    pub fn check(&self, payload: &Value) -> Result<GroupInput, ApiError> {
        // Scenes currently share the same field rules; the hook stays so
        // create and update can diverge without touching call sites.
        match self.scene {
            Scene::Create | Scene::Update => self.check_fields(payload),
        }
    }

    fn check_fields(&self, payload: &Value) -> Result<GroupInput, ApiError> {
        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if name.is_empty() {
            return Err(ApiError::Invalid("name is required".into()));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ApiError::Invalid(format!(
                "name must be at most {MAX_NAME_LEN} characters"
            )));
        }

        let rules = match payload.get("rules") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => {
                let mut rules = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(rule) => rules.push(rule.to_string()),
                        None => return Err(ApiError::Invalid("rules must be strings".into())),
                    }
                }
                rules
            }
            Some(_) => return Err(ApiError::Invalid("rules must be an array".into())),
        };

        Ok(GroupInput {
            name: name.to_string(),
            rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn name_is_required_and_trimmed() {
        let validator = GroupValidator::scene(Scene::Create);
        assert!(validator.check(&json!({})).is_err());
        assert!(validator.check(&json!({ "name": "   " })).is_err());

        let input = validator
            .check(&json!({ "name": "  ops  " }))
            .expect("valid");
        assert_eq!(input.name, "ops");
        assert!(input.rules.is_empty());
    }

    #[test]
    fn rules_must_be_string_array() {
        let validator = GroupValidator::scene(Scene::Update);
        assert!(validator
            .check(&json!({ "name": "ops", "rules": "admin" }))
            .is_err());
        assert!(validator
            .check(&json!({ "name": "ops", "rules": [1, 2] }))
            .is_err());

        let input = validator
            .check(&json!({ "name": "ops", "rules": ["group:read", "group:write"] }))
            .expect("valid");
        assert_eq!(input.rules, ["group:read", "group:write"]);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let validator = GroupValidator::scene(Scene::Create);
        let long = "g".repeat(MAX_NAME_LEN + 1);
        assert!(validator.check(&json!({ "name": long })).is_err());
    }
}
