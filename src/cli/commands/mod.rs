//! Command implementations
//!
//! Each resource module wires a [`Config`](crate::cli::registrar::Config)
//! to its API endpoints; [`resources`] collects them for the root command.

pub mod completions;
pub mod config;
pub mod module;
pub mod organization;
pub mod team;
pub mod variable;
pub mod workspace;

use crate::cli::registrar::ResourceCommand;
use crate::core::scope::{find_by_name, ParentScope, ResolveError};
use crate::entities::{Organization, Workspace};

const API_ROOT: &str = "/api/v1";

/// Every registered resource, in help order
pub fn resources() -> Vec<Box<dyn ResourceCommand>> {
    vec![
        Box::new(organization::command()),
        Box::new(team::command()),
        Box::new(workspace::command()),
        Box::new(module::command()),
        Box::new(variable::command()),
    ]
}

/// Path of a collection nested below its resolved parents
///
/// `segments` names every level down to the collection, `parents` holds one
/// ID per level above it: `["organization", "workspace"]` with `["o-1"]` is
/// `/api/v1/organization/o-1/workspace`.
pub fn collection_path(segments: &[&str], parents: &[String]) -> String {
    let mut path = String::from(API_ROOT);
    for (i, segment) in segments.iter().enumerate() {
        path.push('/');
        path.push_str(segment);
        if let Some(id) = parents.get(i) {
            path.push('/');
            path.push_str(id);
        }
    }
    path
}

/// Path of one item in a nested collection
pub fn item_path(segments: &[&str], parents: &[String], id: &str) -> String {
    format!("{}/{}", collection_path(segments, parents), id)
}

/// `--organization-id` / `--organization-name`
pub fn organization_scope() -> ParentScope {
    ParentScope::named("organization", |client, _, name| {
        find_by_name::<Organization>(client, &collection_path(&["organization"], &[]), name)
    })
    .accepting_uuids()
}

/// `--workspace-id` / `--workspace-name`, looked up inside the organization
///
/// Must come after [`organization_scope`].
pub fn workspace_scope() -> ParentScope {
    ParentScope::named("workspace", |client, resolved, name| {
        if resolved.is_empty() {
            return Err(ResolveError::MissingParent {
                scope: "workspace".to_string(),
                parent: "organization".to_string(),
            });
        }
        find_by_name::<Workspace>(
            client,
            &collection_path(&["organization", "workspace"], resolved),
            name,
        )
    })
    .accepting_uuids()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_paths() {
        assert_eq!(collection_path(&["organization"], &[]), "/api/v1/organization");
        assert_eq!(
            collection_path(&["organization", "workspace", "variable"], &["o-1".into(), "w-1".into()]),
            "/api/v1/organization/o-1/workspace/w-1/variable"
        );
        assert_eq!(
            item_path(&["organization", "team"], &["o-1".into()], "t-1"),
            "/api/v1/organization/o-1/team/t-1"
        );
    }

    #[test]
    fn test_empty_id_gives_empty_segment() {
        assert_eq!(item_path(&["organization"], &[], ""), "/api/v1/organization/");
    }

    #[test]
    fn test_resource_names_are_unique() {
        let names: Vec<_> = resources().iter().map(|r| r.name().to_string()).collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn test_workspace_scope_needs_organization_first() {
        use crate::testing::TestServer;
        use clap::{Arg, Command};

        let scope = workspace_scope();
        let flags = Command::new("test")
            .arg(Arg::new("workspace-name").long("workspace-name"))
            .try_get_matches_from(["test", "--workspace-name=prod"])
            .unwrap();
        let server = TestServer::new();

        let err = crate::core::scope::resolve_parents(&server.client(), &flags, &[scope]).unwrap_err();

        assert!(matches!(err, ResolveError::MissingParent { .. }));
        assert!(server.requests().is_empty());
    }
}
