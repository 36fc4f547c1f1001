//! `resctl team` - teams inside an organization

use crate::cli::commands::{collection_path, item_path, organization_scope};
use crate::cli::registrar::Config;
use crate::core::field::FieldDef;
use crate::entities::Team;

const SEGMENTS: &[&str] = &["organization", "team"];

pub const FIELDS: &[FieldDef] = &[
    FieldDef::string("name", "name", "Team name").required().short('n'),
    FieldDef::bool("manage_state", "manage-state", "Allow managing workspace state"),
    FieldDef::bool("manage_workspace", "manage-workspace", "Allow managing workspaces"),
    FieldDef::bool("manage_module", "manage-module", "Allow managing modules"),
    FieldDef::bool("manage_provider", "manage-provider", "Allow managing providers"),
    FieldDef::bool("manage_vcs", "manage-vcs", "Allow managing VCS connections"),
    FieldDef::bool("manage_template", "manage-template", "Allow managing templates"),
];

pub fn command() -> Config<Team> {
    Config::<Team>::new("Manage teams")
        .scope(organization_scope())
        .fields(FIELDS)
        .list(|client, parents, options| client.list(&collection_path(SEGMENTS, parents), options))
        .get(|client, parents, id| client.get(&item_path(SEGMENTS, parents, id)))
        .create(|client, parents, team| client.create(&collection_path(SEGMENTS, parents), team))
        .update(|client, parents, team| client.update(&item_path(SEGMENTS, parents, &team.id), team))
        .delete(|client, parents, id| client.delete(&item_path(SEGMENTS, parents, id)))
}
