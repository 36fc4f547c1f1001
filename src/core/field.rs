//! Field definitions and the flag-to-resource binder
//!
//! A [`FieldDef`] table describes which command-line flags a resource
//! accepts. The binder copies flag values into the resource through the
//! typed slots each resource hands out from [`Resource::field_mut`]:
//!
//! - full mode ([`populate_fields`], used by `create`) writes every field
//! - partial mode ([`populate_changed_fields`], used by `update`) writes
//!   only the flags the user set explicitly, leaving the rest at zero

use std::fmt;
use thiserror::Error;

use crate::core::flags::FlagSource;
use crate::core::resource::Resource;

/// Primitive kind of a bindable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Bool,
    Int,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Int => write!(f, "int"),
        }
    }
}

/// A value read from a flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Bool(bool),
    Int(i64),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Int(_) => FieldKind::Int,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

/// Mutable handle on one attribute of a resource
///
/// `Opt*` variants are optional attributes where `None` means "not given".
pub enum FieldSlot<'a> {
    Str(&'a mut String),
    OptStr(&'a mut Option<String>),
    Bool(&'a mut bool),
    OptBool(&'a mut Option<bool>),
    Int(&'a mut i64),
    OptInt(&'a mut Option<i64>),
}

impl FieldSlot<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldSlot::Str(_) | FieldSlot::OptStr(_) => FieldKind::String,
            FieldSlot::Bool(_) | FieldSlot::OptBool(_) => FieldKind::Bool,
            FieldSlot::Int(_) | FieldSlot::OptInt(_) => FieldKind::Int,
        }
    }

    /// Write a value, returning it back if the kinds do not match
    ///
    /// An empty string written to an optional string leaves it untouched.
    pub fn write(self, value: FieldValue) -> Result<(), FieldValue> {
        match (self, value) {
            (FieldSlot::Str(slot), FieldValue::String(v)) => *slot = v,
            (FieldSlot::OptStr(slot), FieldValue::String(v)) => {
                if !v.is_empty() {
                    *slot = Some(v);
                }
            }
            (FieldSlot::Bool(slot), FieldValue::Bool(v)) => *slot = v,
            (FieldSlot::OptBool(slot), FieldValue::Bool(v)) => *slot = Some(v),
            (FieldSlot::Int(slot), FieldValue::Int(v)) => *slot = v,
            (FieldSlot::OptInt(slot), FieldValue::Int(v)) => *slot = Some(v),
            (_, value) => return Err(value),
        }
        Ok(())
    }
}

/// Declarative description of one resource attribute exposed as a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Attribute name on the resource (as accepted by `Resource::field_mut`)
    pub field: &'static str,
    /// Long flag name, without the leading dashes
    pub flag: &'static str,
    pub short: Option<char>,
    pub kind: FieldKind,
    /// Mandatory on create
    pub required: bool,
    pub description: &'static str,
}

impl FieldDef {
    pub const fn new(
        field: &'static str,
        flag: &'static str,
        kind: FieldKind,
        description: &'static str,
    ) -> Self {
        Self {
            field,
            flag,
            short: None,
            kind,
            required: false,
            description,
        }
    }

    pub const fn string(field: &'static str, flag: &'static str, description: &'static str) -> Self {
        Self::new(field, flag, FieldKind::String, description)
    }

    pub const fn bool(field: &'static str, flag: &'static str, description: &'static str) -> Self {
        Self::new(field, flag, FieldKind::Bool, description)
    }

    pub const fn int(field: &'static str, flag: &'static str, description: &'static str) -> Self {
        Self::new(field, flag, FieldKind::Int, description)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }
}

/// Errors raised while binding flags onto a resource
///
/// Both variants are programming errors in a resource's field table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("{resource} has no field named '{field}'")]
    UnknownField { resource: &'static str, field: String },

    #[error("field '{field}' of {resource} is a {actual} field, not {expected}")]
    KindMismatch {
        resource: &'static str,
        field: String,
        expected: FieldKind,
        actual: FieldKind,
    },
}

/// Check that every definition names an attribute of the right kind
pub fn check_fields<T: Resource>(fields: &[FieldDef]) -> Result<(), BindError> {
    let mut probe = T::default();
    for def in fields {
        let slot = probe
            .field_mut(def.field)
            .ok_or_else(|| BindError::UnknownField {
                resource: T::NAME,
                field: def.field.to_string(),
            })?;
        if slot.kind() != def.kind {
            return Err(BindError::KindMismatch {
                resource: T::NAME,
                field: def.field.to_string(),
                expected: def.kind,
                actual: slot.kind(),
            });
        }
    }
    Ok(())
}

/// Write every field's current flag value into the target (create)
pub fn populate_fields<T, F>(flags: &F, fields: &[FieldDef], target: &mut T) -> Result<(), BindError>
where
    T: Resource,
    F: FlagSource + ?Sized,
{
    check_fields::<T>(fields)?;
    for def in fields {
        set_struct_field(target, def.field, flags.value(def.flag, def.kind))?;
    }
    Ok(())
}

/// Write only the fields whose flags the user set explicitly (update)
pub fn populate_changed_fields<T, F>(
    flags: &F,
    fields: &[FieldDef],
    target: &mut T,
) -> Result<(), BindError>
where
    T: Resource,
    F: FlagSource + ?Sized,
{
    check_fields::<T>(fields)?;
    for def in fields.iter().filter(|def| flags.changed(def.flag)) {
        tracing::trace!(field = def.field, flag = def.flag, "binding changed flag");
        set_struct_field(target, def.field, flags.value(def.flag, def.kind))?;
    }
    Ok(())
}

/// Force a value into a named attribute, bypassing any field table
///
/// Used to stamp the primary identifier onto an update target.
pub fn set_struct_field<T: Resource>(
    target: &mut T,
    field: &str,
    value: impl Into<FieldValue>,
) -> Result<(), BindError> {
    let value = value.into();
    let slot = target
        .field_mut(field)
        .ok_or_else(|| BindError::UnknownField {
            resource: T::NAME,
            field: field.to_string(),
        })?;
    let actual = slot.kind();
    slot.write(value).map_err(|rejected| BindError::KindMismatch {
        resource: T::NAME,
        field: field.to_string(),
        expected: rejected.kind(),
        actual,
    })
}
