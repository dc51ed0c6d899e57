//! Named-parameter binding
//!
//! Query templates use `:name` placeholders. [`bind_named`] rewrites each
//! placeholder to a positional `?` and collects the matching values in
//! placeholder order, so a name may appear more than once.

use boxstash_core::errors::{invalid_data, Result};
use rusqlite::types::Value;

/// Ordered name -> value bindings for one statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(&'static str, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding; a later binding for the same name replaces the earlier one
    pub fn with(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Exposes an entity's fields as named query parameters
pub trait ToParams {
    fn to_params(&self) -> Params;
}

/// A template rewritten to positional form with its arguments
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Rewrite `:name` placeholders to `?` and collect their values
///
/// Colons inside quoted literals or identifiers, `::` casts, and a colon not
/// followed by an identifier are left untouched.
///
/// # Errors
///
/// `InvalidData` when a placeholder has no binding in `params`.
pub fn bind_named(template: &str, params: &Params) -> Result<BoundQuery> {
    let bytes = template.as_bytes();
    let mut sql = String::with_capacity(template.len());
    let mut args = Vec::new();
    let mut quote: Option<u8> = None;
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'\'' | b'"' => {
                quote = Some(b);
                i += 1;
            }
            b':' if bytes.get(i + 1) == Some(&b':') => i += 2,
            b':' if bytes.get(i + 1).copied().is_some_and(is_ident_start) => {
                let start = i + 1;
                let mut end = start + 1;
                while end < bytes.len() && is_ident_continue(bytes[end]) {
                    end += 1;
                }
                let name = &template[start..end];
                let value = params.get(name).ok_or_else(|| {
                    invalid_data("query", format!("could not find name {} in params", name))
                })?;
                sql.push_str(&template[copied..i]);
                sql.push('?');
                args.push(value.clone());
                copied = end;
                i = end;
            }
            _ => i += 1,
        }
    }
    sql.push_str(&template[copied..]);

    Ok(BoundQuery { sql, args })
}
