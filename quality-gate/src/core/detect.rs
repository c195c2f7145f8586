//! Null and duplicate detection rules.

use super::Record;
use crate::config::{DuplicateKey, FieldSelection, GateConfig};
use crate::error::Result;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// Decides whether a record counts as null.
#[derive(Debug, Clone)]
pub(crate) struct NullRule {
    selection: FieldSelection,
    blank_strings_are_null: bool,
}

impl NullRule {
    pub(crate) fn from_config(config: &GateConfig) -> Self {
        Self {
            selection: config.null_fields.clone(),
            blank_strings_are_null: config.blank_strings_are_null,
        }
    }

    pub(crate) fn is_null<R: Record + ?Sized>(&self, record: &R) -> bool {
        match &self.selection {
            FieldSelection::All => {
                let mut entries = record.entries().peekable();
                if entries.peek().is_none() {
                    return true;
                }
                entries.any(|(_, value)| self.is_empty_value(value))
            }
            FieldSelection::Fields(fields) => fields.iter().any(|name| {
                record
                    .field(name)
                    .map_or(true, |value| self.is_empty_value(value))
            }),
        }
    }

    fn is_empty_value(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => self.blank_strings_are_null && s.trim().is_empty(),
            _ => false,
        }
    }
}

/// SHA-256 digest of a record's canonical duplicate key.
pub(crate) type KeyDigest = [u8; 32];

/// Builds the canonical key a record is deduplicated on.
#[derive(Debug, Clone)]
pub(crate) struct KeyRule {
    key: DuplicateKey,
}

impl KeyRule {
    pub(crate) fn from_config(config: &GateConfig) -> Self {
        Self {
            key: config.duplicate_key.clone(),
        }
    }

    /// Serializes the key as JSON with sorted member names and hashes it.
    pub(crate) fn digest<R: Record + ?Sized>(&self, record: &R) -> Result<KeyDigest> {
        let canonical = match &self.key {
            DuplicateKey::FullRecord => {
                let members: BTreeMap<&str, &Value> = record.entries().collect();
                let kind = if record.is_object() { "object" } else { "value" };
                serde_json::to_vec(&(kind, members))?
            }
            DuplicateKey::Fields(fields) => {
                let members: Vec<&Value> = fields
                    .iter()
                    .map(|name| record.field(name).unwrap_or(&Value::Null))
                    .collect();
                serde_json::to_vec(&members)?
            }
        };
        Ok(Sha256::digest(&canonical).into())
    }
}

/// Remembers the keys seen so far in a batch.
#[derive(Debug, Default)]
pub(crate) struct SeenKeys {
    seen: HashSet<KeyDigest>,
}

impl SeenKeys {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Records `digest`, returning true if it was already present.
    pub(crate) fn is_repeat(&mut self, digest: KeyDigest) -> bool {
        !self.seen.insert(digest)
    }

    pub(crate) fn distinct(&self) -> usize {
        self.seen.len()
    }
}
