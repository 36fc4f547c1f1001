//! Resource trait - common interface for every API resource type

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use crate::core::field::FieldSlot;

/// A record that can be flattened into table and TSV rows
///
/// Rows are built from the serialized form, so every attribute the type
/// serializes becomes a column except the ones listed in `RELATIONS`.
pub trait Tabular: Serialize {
    /// Attributes that reference other resources (excluded from flat output)
    const RELATIONS: &'static [&'static str] = &[];
}

/// Common trait for all remote resources driven by the command registrar
pub trait Resource: Tabular + DeserializeOwned + Default + Clone + fmt::Debug + 'static {
    /// Resource name as used in commands, filters and error messages (e.g. "workspace")
    const NAME: &'static str;

    /// Get the resource's canonical ID
    fn id(&self) -> &str;

    /// Look up a bindable attribute by its field name
    ///
    /// Returns `None` when the resource has no such attribute. The binder
    /// treats that as a configuration error.
    fn field_mut(&mut self, name: &str) -> Option<FieldSlot<'_>>;
}

/// Reference to another resource (relation/link attribute)
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Relation {
    pub id: String,
}

impl Relation {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
