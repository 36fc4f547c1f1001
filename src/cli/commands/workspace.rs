//! `resctl workspace` - workspaces inside an organization

use crate::cli::commands::{collection_path, item_path, organization_scope};
use crate::cli::registrar::Config;
use crate::core::field::FieldDef;
use crate::entities::Workspace;

const SEGMENTS: &[&str] = &["organization", "workspace"];

pub const FIELDS: &[FieldDef] = &[
    FieldDef::string("name", "name", "Workspace name").required().short('n'),
    FieldDef::string("description", "description", "Description").short('d'),
    FieldDef::string("source", "source", "Repository URL").required().short('s'),
    FieldDef::string("branch", "branch", "Branch to check out").required().short('b'),
    FieldDef::string("folder", "folder", "Folder inside the repository").short('f'),
    FieldDef::string("iac_type", "iac-type", "Infrastructure tool (terraform, tofu)"),
    FieldDef::string("iac_version", "iac-version", "Infrastructure tool version"),
    FieldDef::string("execution_mode", "execution-mode", "Execution mode (remote, local, agent)"),
];

pub fn command() -> Config<Workspace> {
    Config::<Workspace>::new("Manage workspaces")
        .aliases(&["ws"])
        .scope(organization_scope())
        .fields(FIELDS)
        .list(|client, parents, options| client.list(&collection_path(SEGMENTS, parents), options))
        .get(|client, parents, id| client.get(&item_path(SEGMENTS, parents, id)))
        .create(|client, parents, ws| client.create(&collection_path(SEGMENTS, parents), ws))
        .update(|client, parents, ws| client.update(&item_path(SEGMENTS, parents, &ws.id), ws))
        .delete(|client, parents, id| client.delete(&item_path(SEGMENTS, parents, id)))
}
