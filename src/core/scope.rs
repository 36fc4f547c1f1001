//! Parent scopes and the resolution chain
//!
//! A child resource lives below one or more parents (a workspace below an
//! organization, a variable below a workspace). Each [`ParentScope`] turns
//! its flags into an ID, either taken verbatim from `--<scope>-id` or looked
//! up by name through the scope's resolver. Scopes resolve strictly in
//! declared order, and each resolver only sees the IDs of earlier scopes.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::core::client::{ApiClient, ApiError, ListOptions};
use crate::core::flags::FlagSource;
use crate::core::resource::Resource;

/// Name → ID lookup for one scope
///
/// Receives the IDs already resolved for earlier scopes plus the name.
pub type Resolver =
    Arc<dyn Fn(&ApiClient, &[String], &str) -> Result<String, ResolveError> + Send + Sync>;

/// Errors raised while resolving parent scopes
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("--{flag} is required")]
    MissingId { flag: String },

    #[error("either --{id_flag} or --{name_flag} is required")]
    MissingIdOrName { id_flag: String, name_flag: String },

    #[error("parent scope '{scope}' accepts a name but has no resolver configured")]
    MissingResolver { scope: String },

    #[error("parent scope '{scope}' must be declared after '{parent}'")]
    MissingParent { scope: String, parent: String },

    #[error("no {scope} named '{name}' was found; pass --{id_flag} instead")]
    NotFound {
        scope: String,
        name: String,
        id_flag: String,
    },

    #[error("{count} {scope}s are named '{name}'; pass --{id_flag} to pick one")]
    Ambiguous {
        scope: String,
        name: String,
        id_flag: String,
        count: usize,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// An ancestor resource whose ID a command needs
#[derive(Clone)]
pub struct ParentScope {
    pub name: &'static str,
    pub id_flag: String,
    pub name_flag: Option<String>,
    resolver: Option<Resolver>,
    accepts_uuids: bool,
}

impl ParentScope {
    /// Scope that only takes `--<name>-id`
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            id_flag: format!("{}-id", name),
            name_flag: None,
            resolver: None,
            accepts_uuids: false,
        }
    }

    /// Scope that takes `--<name>-id` or `--<name>-name`, resolving names with `resolver`
    pub fn named<F>(name: &'static str, resolver: F) -> Self
    where
        F: Fn(&ApiClient, &[String], &str) -> Result<String, ResolveError> + Send + Sync + 'static,
    {
        Self::new(name)
            .with_name_flag(format!("{}-name", name))
            .with_resolver(resolver)
    }

    pub fn with_name_flag(mut self, flag: impl Into<String>) -> Self {
        self.name_flag = Some(flag.into());
        self
    }

    pub fn with_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&ApiClient, &[String], &str) -> Result<String, ResolveError> + Send + Sync + 'static,
    {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Use UUID-shaped name values as IDs without calling the resolver
    pub fn accepting_uuids(mut self) -> Self {
        self.accepts_uuids = true;
        self
    }

    /// Resolve this scope's ID from the flags
    fn resolve<F>(&self, client: &ApiClient, flags: &F, resolved: &[String]) -> Result<String, ResolveError>
    where
        F: FlagSource + ?Sized,
    {
        let id = flags.string(&self.id_flag);
        if !id.is_empty() {
            tracing::debug!(scope = self.name, id = %id, "using parent id from flag");
            return Ok(id);
        }

        let Some(name_flag) = &self.name_flag else {
            return Err(ResolveError::MissingId {
                flag: self.id_flag.clone(),
            });
        };

        let name = flags.string(name_flag);
        if name.is_empty() {
            return Err(ResolveError::MissingIdOrName {
                id_flag: self.id_flag.clone(),
                name_flag: name_flag.clone(),
            });
        }

        let resolver = self
            .resolver
            .as_ref()
            .ok_or_else(|| ResolveError::MissingResolver {
                scope: self.name.to_string(),
            })?;

        tracing::debug!(scope = self.name, name = %name, "resolving parent by name");
        if self.accepts_uuids {
            resolve_name_or_uuid(&name, || resolver(client, resolved, &name))
        } else {
            resolver(client, resolved, &name)
        }
    }
}

impl fmt::Debug for ParentScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentScope")
            .field("name", &self.name)
            .field("id_flag", &self.id_flag)
            .field("name_flag", &self.name_flag)
            .field("resolver", &self.resolver.is_some())
            .field("accepts_uuids", &self.accepts_uuids)
            .finish()
    }
}

/// Resolve every scope in order, returning one ID per scope
pub fn resolve_parents<F>(
    client: &ApiClient,
    flags: &F,
    scopes: &[ParentScope],
) -> Result<Vec<String>, ResolveError>
where
    F: FlagSource + ?Sized,
{
    let mut resolved = Vec::with_capacity(scopes.len());
    for scope in scopes {
        let id = scope.resolve(client, flags, &resolved)?;
        resolved.push(id);
    }
    Ok(resolved)
}

static UUID_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{4}-?[0-9a-f]{12}$")
        .expect("UUID pattern is valid")
});

/// Whether a value has the shape of a UUID (hyphens optional, any case)
pub fn looks_like_uuid(value: &str) -> bool {
    UUID_SHAPE.is_match(value)
}

/// Use a UUID-shaped value as-is, otherwise run the lookup
pub fn resolve_name_or_uuid<L>(value: &str, lookup: L) -> Result<String, ResolveError>
where
    L: FnOnce() -> Result<String, ResolveError>,
{
    if looks_like_uuid(value) {
        tracing::debug!(value, "value is UUID-shaped, skipping name lookup");
        return Ok(value.to_string());
    }
    lookup()
}

/// Find the single resource of type `T` below `path` whose name is `name`
///
/// Zero or several matches are both errors that point the user at the
/// scope's ID flag.
pub fn find_by_name<T: Resource>(
    client: &ApiClient,
    path: &str,
    name: &str,
) -> Result<String, ResolveError> {
    let matches: Vec<T> = client.list(path, &ListOptions::filter(format!("name=={}", name)))?;
    match matches.as_slice() {
        [only] => Ok(only.id().to_string()),
        [] => Err(ResolveError::NotFound {
            scope: T::NAME.to_string(),
            name: name.to_string(),
            id_flag: format!("{}-id", T::NAME),
        }),
        many => Err(ResolveError::Ambiguous {
            scope: T::NAME.to_string(),
            name: name.to_string(),
            id_flag: format!("{}-id", T::NAME),
            count: many.len(),
        }),
    }
}
