//! Module resource - private registry module inside an organization

use serde::{Deserialize, Serialize};

use crate::core::field::FieldSlot;
use crate::core::resource::{Relation, Resource, Tabular};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Provider the module targets (e.g. "aws")
    pub provider: Option<String>,
    pub source: Option<String>,
    pub folder: Option<String>,
    /// Prefix of the git tags that mark module versions
    pub tag_prefix: Option<String>,
    pub organization: Option<Relation>,
}

impl Tabular for Module {
    const RELATIONS: &'static [&'static str] = &["organization"];
}

impl Resource for Module {
    const NAME: &'static str = "module";

    fn id(&self) -> &str {
        &self.id
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldSlot<'_>> {
        Some(match name {
            "id" => FieldSlot::Str(&mut self.id),
            "name" => FieldSlot::OptStr(&mut self.name),
            "description" => FieldSlot::OptStr(&mut self.description),
            "provider" => FieldSlot::OptStr(&mut self.provider),
            "source" => FieldSlot::OptStr(&mut self.source),
            "folder" => FieldSlot::OptStr(&mut self.folder),
            "tag_prefix" => FieldSlot::OptStr(&mut self.tag_prefix),
            _ => return None,
        })
    }
}
