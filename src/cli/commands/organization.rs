//! `resctl organization` - organization management

use crate::cli::commands::{collection_path, item_path};
use crate::cli::registrar::Config;
use crate::core::field::FieldDef;
use crate::entities::Organization;

const SEGMENTS: &[&str] = &["organization"];

pub const FIELDS: &[FieldDef] = &[
    FieldDef::string("name", "name", "Organization name").required().short('n'),
    FieldDef::string("description", "description", "Description").short('d'),
    FieldDef::string("execution_mode", "execution-mode", "Default execution mode (remote, local, agent)"),
    FieldDef::string("icon", "icon", "Icon URL"),
    FieldDef::bool("disabled", "disabled", "Disable the organization"),
];

pub fn command() -> Config<Organization> {
    Config::<Organization>::new("Manage organizations")
        .aliases(&["org"])
        .fields(FIELDS)
        .list(|client, parents, options| client.list(&collection_path(SEGMENTS, parents), options))
        .get(|client, parents, id| client.get(&item_path(SEGMENTS, parents, id)))
        .create(|client, parents, org| client.create(&collection_path(SEGMENTS, parents), org))
        .update(|client, parents, org| client.update(&item_path(SEGMENTS, parents, &org.id), org))
        .delete(|client, parents, id| client.delete(&item_path(SEGMENTS, parents, id)))
}
