//! `resctl module` - private registry modules

use crate::cli::commands::{collection_path, item_path, organization_scope};
use crate::cli::registrar::Config;
use crate::core::field::FieldDef;
use crate::entities::Module;

const SEGMENTS: &[&str] = &["organization", "module"];

pub const FIELDS: &[FieldDef] = &[
    FieldDef::string("name", "name", "Module name").required().short('n'),
    FieldDef::string("description", "description", "Description").short('d'),
    FieldDef::string("provider", "provider", "Provider the module targets").required().short('p'),
    FieldDef::string("source", "source", "Repository URL").required().short('s'),
    FieldDef::string("folder", "folder", "Folder inside the repository").short('f'),
    FieldDef::string("tag_prefix", "tag-prefix", "Prefix of version tags"),
];

pub fn command() -> Config<Module> {
    Config::<Module>::new("Manage registry modules")
        .scope(organization_scope())
        .fields(FIELDS)
        .list(|client, parents, options| client.list(&collection_path(SEGMENTS, parents), options))
        .get(|client, parents, id| client.get(&item_path(SEGMENTS, parents, id)))
        .create(|client, parents, module| client.create(&collection_path(SEGMENTS, parents), module))
        .update(|client, parents, module| {
            client.update(&item_path(SEGMENTS, parents, &module.id), module)
        })
        .delete(|client, parents, id| client.delete(&item_path(SEGMENTS, parents, id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::check_fields;

    #[test]
    fn test_field_table_matches_resource() {
        check_fields::<Module>(command().field_defs()).unwrap();
    }
}
