//! `resctl variable` - workspace variables

use crate::cli::commands::{collection_path, item_path, organization_scope, workspace_scope};
use crate::cli::registrar::Config;
use crate::core::field::FieldDef;
use crate::entities::Variable;

const SEGMENTS: &[&str] = &["organization", "workspace", "variable"];

pub const FIELDS: &[FieldDef] = &[
    FieldDef::string("key", "key", "Variable name").required().short('k'),
    FieldDef::string("value", "value", "Variable value").required(),
    FieldDef::string("description", "description", "Description").short('d'),
    FieldDef::string("category", "category", "TERRAFORM or ENV").short('c'),
    FieldDef::bool("sensitive", "sensitive", "Hide the value once written"),
    FieldDef::bool("hcl", "hcl", "Parse the value as HCL"),
];

pub fn command() -> Config<Variable> {
    Config::<Variable>::new("Manage workspace variables")
        .aliases(&["var"])
        .scope(organization_scope())
        .scope(workspace_scope())
        .fields(FIELDS)
        .list(|client, parents, options| client.list(&collection_path(SEGMENTS, parents), options))
        .get(|client, parents, id| client.get(&item_path(SEGMENTS, parents, id)))
        .create(|client, parents, var| client.create(&collection_path(SEGMENTS, parents), var))
        .update(|client, parents, var| client.update(&item_path(SEGMENTS, parents, &var.id), var))
        .delete(|client, parents, id| client.delete(&item_path(SEGMENTS, parents, id)))
}
