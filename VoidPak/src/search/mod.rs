//! Asset search queries
//!
//! A [`SearchQuery`] holds four clause maps, each keyed by field (`"name"` or
//! `"type"`) with a list of values:
//!
//! - **pass**: the field must contain every value. For names, containing the
//!   decimal FNV-1a hash of the value also counts, so plain terms match
//!   hashed asset names. The hash is taken over the value as given, before
//!   lower-casing.
//! - **reject**: the asset is dropped when its field contains a value (see
//!   [`RejectMode`] for how names are checked).
//! - **explicit pass**: the value list must contain the whole field.
//! - **explicit reject**: the asset is dropped when the value list contains
//!   the whole field.
//!
//! Clauses are evaluated in that order and stop at the first failure. Unknown
//! keys are ignored. Fields are lower-cased before comparison; explicit values
//! are compared as given, so callers must lower-case them.
//!
//! ```
//! use voidpak::asset::{Asset, AssetType};
//! use voidpak::search::SearchQuery;
//!
//! let asset = Asset::new("char_soldier_01").with_type(AssetType::Model);
//! assert!(SearchQuery::new().with_pass("name", "soldier").matches(&asset));
//! assert!(!SearchQuery::parse("soldier robot").matches(&asset));
//! ```

mod parse;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetType};
use crate::utils::hash::fnv1a_64_str;

/// Read access the query engine needs from a searchable item
pub trait Searchable {
    fn search_name(&self) -> &str;
    fn search_type(&self) -> AssetType;
}

impl Searchable for Asset {
    fn search_name(&self) -> &str {
        self.name()
    }

    fn search_type(&self) -> AssetType {
        self.asset_type()
    }
}

/// Field a clause applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    Name,
    Type,
}

impl QueryField {
    /// Map a clause key to a field. Unknown keys yield `None` and are skipped.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(QueryField::Name),
            "type" => Some(QueryField::Type),
            _ => None,
        }
    }
}

/// How reject clauses treat names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RejectMode {
    /// Reject only when the name contains both the value and its hash.
    #[default]
    Literal,
    /// Reject when the name contains the value or its hash, mirroring pass.
    Either,
}

/// Clause map: field key to values
pub type Clauses = IndexMap<String, Vec<String>>;

/// A structured asset filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub pass: Clauses,
    #[serde(default)]
    pub reject: Clauses,
    #[serde(default)]
    pub explicit_pass: Clauses,
    #[serde(default)]
    pub explicit_reject: Clauses,
    #[serde(default)]
    pub reject_mode: RejectMode,
}

impl SearchQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pass(mut self, key: &str, value: &str) -> Self {
        push_clause(&mut self.pass, key, value);
        self
    }

    #[must_use]
    pub fn with_reject(mut self, key: &str, value: &str) -> Self {
        push_clause(&mut self.reject, key, value);
        self
    }

    #[must_use]
    pub fn with_explicit_pass(mut self, key: &str, value: &str) -> Self {
        push_clause(&mut self.explicit_pass, key, value);
        self
    }

    #[must_use]
    pub fn with_explicit_reject(mut self, key: &str, value: &str) -> Self {
        push_clause(&mut self.explicit_reject, key, value);
        self
    }

    #[must_use]
    pub fn with_reject_mode(mut self, mode: RejectMode) -> Self {
        self.reject_mode = mode;
        self
    }

    /// True when no clause of any category is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pass.is_empty()
            && self.reject.is_empty()
            && self.explicit_pass.is_empty()
            && self.explicit_reject.is_empty()
    }

    /// Check an item against every clause.
    pub fn matches<S: Searchable + ?Sized>(&self, item: &S) -> bool {
        let name = item.search_name().to_lowercase();
        let asset_type = item.search_type().as_str();
        self.matches_fields(&name, asset_type)
    }

    /// Check already lower-cased field values against every clause.
    #[must_use]
    pub fn matches_fields(&self, name: &str, asset_type: &str) -> bool {
        self.check_pass(name, asset_type)
            && self.check_reject(name, asset_type)
            && check_explicit(&self.explicit_pass, name, asset_type, true)
            && check_explicit(&self.explicit_reject, name, asset_type, false)
    }

    fn check_pass(&self, name: &str, asset_type: &str) -> bool {
        for (key, values) in &self.pass {
            let ok = match QueryField::from_key(key) {
                Some(QueryField::Name) => values.iter().all(|value| {
                    name.contains(&value.to_lowercase()) || name.contains(&hashed(value))
                }),
                Some(QueryField::Type) => values
                    .iter()
                    .all(|value| asset_type.contains(&value.to_lowercase())),
                None => true,
            };
            if !ok {
                return false;
            }
        }
        true
    }

    fn check_reject(&self, name: &str, asset_type: &str) -> bool {
        for (key, values) in &self.reject {
            let rejected = match QueryField::from_key(key) {
                Some(QueryField::Name) => values.iter().any(|value| {
                    let plain = name.contains(&value.to_lowercase());
                    let hash = name.contains(&hashed(value));
                    match self.reject_mode {
                        RejectMode::Literal => plain && hash,
                        RejectMode::Either => plain || hash,
                    }
                }),
                Some(QueryField::Type) => values
                    .iter()
                    .any(|value| asset_type.contains(&value.to_lowercase())),
                None => false,
            };
            if rejected {
                return false;
            }
        }
        true
    }
}

fn push_clause(clauses: &mut Clauses, key: &str, value: &str) {
    clauses
        .entry(key.to_lowercase())
        .or_default()
        .push(value.to_string());
}

fn hashed(value: &str) -> String {
    fnv1a_64_str(value).to_string()
}

/// Whole-field membership. `want` is true for explicit pass, false for explicit reject.
fn check_explicit(clauses: &Clauses, name: &str, asset_type: &str, want: bool) -> bool {
    clauses.iter().all(|(key, values)| {
        let field = match QueryField::from_key(key) {
            Some(QueryField::Name) => name,
            Some(QueryField::Type) => asset_type,
            None => return true,
        };
        values.iter().any(|value| value == field) == want
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soldier() -> Asset {
        Asset::new("char_soldier_01").with_type(AssetType::Model)
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = SearchQuery::new();
        assert!(query.is_empty());
        assert!(query.matches(&soldier()));
        assert!(query.matches(&Asset::default()));
    }

    #[test]
    fn test_pass_requires_every_value() {
        assert!(SearchQuery::new().with_pass("name", "soldier").matches(&soldier()));
        assert!(
            !SearchQuery::new()
                .with_pass("name", "soldier")
                .with_pass("name", "robot")
                .matches(&soldier())
        );
    }

    #[test]
    fn test_pass_is_case_insensitive() {
        assert!(SearchQuery::new().with_pass("name", "SOLDIER").matches(&soldier()));
        let upper = Asset::new("CHAR_Soldier").with_type(AssetType::Model);
        assert!(SearchQuery::new().with_pass("name", "soldier").matches(&upper));
    }

    #[test]
    fn test_pass_matches_hashed_names() {
        let hashed_asset = Asset::new(format!("res/{}", fnv1a_64_str("soldier")));
        assert!(SearchQuery::new().with_pass("name", "soldier").matches(&hashed_asset));
        assert!(!SearchQuery::new().with_pass("name", "robot").matches(&hashed_asset));
    }

    #[test]
    fn test_hash_uses_value_as_given() {
        let query = SearchQuery::new().with_pass("name", "Soldier");
        let exact = Asset::new(format!("res/{}", fnv1a_64_str("Soldier")));
        let lowered = Asset::new(format!("res/{}", fnv1a_64_str("soldier")));
        assert!(query.matches(&exact));
        assert!(!query.matches(&lowered));

        let either = SearchQuery::new()
            .with_reject("name", "Soldier")
            .with_reject_mode(RejectMode::Either);
        assert!(!either.matches(&exact));
        assert!(either.matches(&lowered));
    }

    #[test]
    fn test_pass_by_type() {
        assert!(SearchQuery::new().with_pass("type", "model").matches(&soldier()));
        assert!(SearchQuery::new().with_pass("type", "mod").matches(&soldier()));
        assert!(!SearchQuery::new().with_pass("type", "image").matches(&soldier()));
    }

    #[test]
    fn test_explicit_pass() {
        assert!(
            SearchQuery::new()
                .with_explicit_pass("name", "char_soldier_01")
                .matches(&soldier())
        );
        assert!(
            !SearchQuery::new()
                .with_explicit_pass("name", "char_soldier_02")
                .matches(&soldier())
        );
        // whole-string membership, not substring
        assert!(!SearchQuery::new().with_explicit_pass("name", "soldier").matches(&soldier()));
        // explicit values are not lower-cased
        assert!(
            !SearchQuery::new()
                .with_explicit_pass("name", "CHAR_SOLDIER_01")
                .matches(&soldier())
        );
    }

    #[test]
    fn test_explicit_reject() {
        assert!(
            !SearchQuery::new()
                .with_explicit_reject("type", "model")
                .matches(&soldier())
        );
        assert!(
            SearchQuery::new()
                .with_explicit_reject("name", "char_soldier_02")
                .matches(&soldier())
        );
    }

    #[test]
    fn test_literal_reject_needs_plain_and_hash() {
        // plain substring alone does not reject
        let query = SearchQuery::new().with_reject("name", "soldier");
        assert!(query.matches(&soldier()));

        // plain and hash together do
        let both = Asset::new(format!("soldier_{}", fnv1a_64_str("soldier")));
        assert!(!query.matches(&both));
    }

    #[test]
    fn test_either_reject_is_distinguishable() {
        let literal = SearchQuery::new().with_reject("name", "soldier");
        let either = literal.clone().with_reject_mode(RejectMode::Either);

        assert!(literal.matches(&soldier()));
        assert!(!either.matches(&soldier()));

        let hashed_only = Asset::new(fnv1a_64_str("soldier").to_string());
        assert!(literal.matches(&hashed_only));
        assert!(!either.matches(&hashed_only));
    }

    #[test]
    fn test_reject_by_type() {
        assert!(!SearchQuery::new().with_reject("type", "model").matches(&soldier()));
        assert!(SearchQuery::new().with_reject("type", "sound").matches(&soldier()));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let query = SearchQuery::new()
            .with_pass("colour", "red")
            .with_reject("size", "big")
            .with_explicit_pass("path", "x")
            .with_explicit_reject("id", "y");
        assert!(query.matches(&soldier()));
    }

    #[test]
    fn test_clause_order_short_circuits() {
        // pass succeeds, explicit reject fails
        let query = SearchQuery::new()
            .with_pass("name", "soldier")
            .with_explicit_reject("name", "char_soldier_01");
        assert!(!query.matches(&soldier()));
    }

    #[test]
    fn test_query_serde_roundtrip() {
        let query = SearchQuery::new()
            .with_pass("name", "soldier")
            .with_explicit_reject("type", "sound");
        let json = serde_json::to_string(&query).unwrap();
        let parsed: SearchQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, query);

        let partial: SearchQuery = serde_json::from_str(r#"{"pass":{"name":["x"]}}"#).unwrap();
        assert_eq!(partial.reject_mode, RejectMode::Literal);
        assert!(partial.reject.is_empty());
    }
}
