//! Core module - resource model, binding, parent resolution and the API client

pub mod client;
pub mod config;
pub mod field;
pub mod flags;
pub mod resource;
pub mod scope;

pub use client::{ApiClient, ApiError, HttpTransport, ListOptions, Transport};
pub use config::{Config, ConfigError};
pub use field::{BindError, FieldDef, FieldKind};
pub use flags::FlagSource;
pub use resource::{Relation, Resource, Tabular};
pub use scope::{ParentScope, ResolveError};
