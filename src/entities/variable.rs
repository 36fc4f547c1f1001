//! Variable resource - a workspace variable

use serde::{Deserialize, Serialize};

use crate::core::field::FieldSlot;
use crate::core::resource::{Relation, Resource, Tabular};

/// A variable set on a workspace
///
/// `category` is either "TERRAFORM" or "ENV". Sensitive values are
/// write-only and come back empty from the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variable {
    pub id: String,
    pub key: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sensitive: Option<bool>,
    pub hcl: Option<bool>,
    pub workspace: Option<Relation>,
}

impl Tabular for Variable {
    const RELATIONS: &'static [&'static str] = &["workspace"];
}

impl Resource for Variable {
    const NAME: &'static str = "variable";

    fn id(&self) -> &str {
        &self.id
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldSlot<'_>> {
        Some(match name {
            "id" => FieldSlot::Str(&mut self.id),
            "key" => FieldSlot::OptStr(&mut self.key),
            "value" => FieldSlot::OptStr(&mut self.value),
            "description" => FieldSlot::OptStr(&mut self.description),
            "category" => FieldSlot::OptStr(&mut self.category),
            "sensitive" => FieldSlot::OptBool(&mut self.sensitive),
            "hcl" => FieldSlot::OptBool(&mut self.hcl),
            _ => return None,
        })
    }
}
