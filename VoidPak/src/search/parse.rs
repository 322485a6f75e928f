//! Free-form query text
//!
//! Whitespace-separated terms, each optionally prefixed with `!` (or `-`) to
//! negate it:
//!
//! | term            | clause          |
//! |-----------------|-----------------|
//! | `word`          | pass name       |
//! | `key:value`     | pass            |
//! | `key=value`     | explicit pass   |
//! | `!word`         | reject name     |
//! | `!key:value`    | reject          |
//! | `!key=value`    | explicit reject |
//!
//! A value may list several alternatives separated by commas, which all land in
//! the same clause. Keys and values are lower-cased.

use super::{Clauses, SearchQuery};

impl SearchQuery {
    /// Build a query from free-form text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut query = SearchQuery::new();

        for term in text.split_whitespace() {
            let (negated, term) = match term.strip_prefix(['!', '-']) {
                Some(rest) => (true, rest),
                None => (false, term),
            };
            if term.is_empty() {
                continue;
            }

            let (key, values, explicit) = if let Some((key, values)) = term.split_once('=') {
                (key, values, true)
            } else if let Some((key, values)) = term.split_once(':') {
                (key, values, false)
            } else {
                ("name", term, false)
            };

            let clauses = match (negated, explicit) {
                (false, false) => &mut query.pass,
                (true, false) => &mut query.reject,
                (false, true) => &mut query.explicit_pass,
                (true, true) => &mut query.explicit_reject,
            };
            add_values(clauses, key, values);
        }

        query
    }
}

fn add_values(clauses: &mut Clauses, key: &str, values: &str) {
    let key = key.to_lowercase();
    let values: Vec<String> = values
        .split(',')
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
        .collect();
    if key.is_empty() || values.is_empty() {
        return;
    }
    clauses.entry(key).or_default().extend(values);
}
