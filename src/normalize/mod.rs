//! Normalization of loosely-typed GitHub payloads into stable records.
//!
//! Every record type has exactly one raw schema (a private `Raw*` struct).
//! Its serde attributes are the defaulting policy for that record: a field
//! with `null_as_default` falls back to its `Default`, an `Option` field
//! is absent-able, and a bare field is required. Anything that does not
//! fit the schema is a [`Error::MalformedResponse`].

mod account;
mod commit;
mod repository;

pub use account::{
    normalize_account, normalize_account_details, normalize_account_search, Account,
    AccountDetails, AccountSearchResults,
};
pub use commit::{
    normalize_commit, normalize_detailed_commit, Commit, CommitAuthor, CommitStats,
    DetailedCommit, UNKNOWN_AUTHOR,
};
pub use repository::{
    normalize_branch, normalize_languages, normalize_repository, Branch, DetailedRepo,
    LanguageUsage, Repository,
};

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode `value` through the raw schema `T`, rejecting anything that is not
/// a JSON object before serde gets a chance to coerce it.
pub(crate) fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T> {
    if !value.is_object() {
        return Err(Error::MalformedResponse(format!(
            "{what}: expected an object, got {}",
            json_type(value)
        )));
    }
    T::deserialize(value).map_err(|e| Error::MalformedResponse(format!("{what}: {e}")))
}

/// Apply `normalize` to every element of a JSON array, keeping order.
pub fn normalize_list<T>(value: &Value, normalize: fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    let items = value.as_array().ok_or_else(|| {
        Error::MalformedResponse(format!("expected an array, got {}", json_type(value)))
    })?;
    items.iter().map(normalize).collect()
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_list_keeps_order() {
        let value = json!([{ "name": "main" }, { "name": "dev" }]);
        let branches = normalize_list(&value, normalize_branch).unwrap();
        let names: Vec<_> = branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["main", "dev"]);
    }

    #[test]
    fn test_normalize_list_rejects_non_array() {
        let err = normalize_list(&json!({ "name": "main" }), normalize_branch).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_normalize_list_fails_on_any_bad_item() {
        let value = json!([{ "name": "main" }, null]);
        assert!(normalize_list(&value, normalize_branch).is_err());
    }
}
