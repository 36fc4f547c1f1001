//! Team resource - permission group inside an organization

use serde::{Deserialize, Serialize};

use crate::core::field::FieldSlot;
use crate::core::resource::{Resource, Tabular};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub name: Option<String>,
    pub manage_state: Option<bool>,
    pub manage_workspace: Option<bool>,
    pub manage_module: Option<bool>,
    pub manage_provider: Option<bool>,
    pub manage_vcs: Option<bool>,
    pub manage_template: Option<bool>,
}

impl Tabular for Team {}

impl Resource for Team {
    const NAME: &'static str = "team";

    fn id(&self) -> &str {
        &self.id
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldSlot<'_>> {
        Some(match name {
            "id" => FieldSlot::Str(&mut self.id),
            "name" => FieldSlot::OptStr(&mut self.name),
            "manage_state" => FieldSlot::OptBool(&mut self.manage_state),
            "manage_workspace" => FieldSlot::OptBool(&mut self.manage_workspace),
            "manage_module" => FieldSlot::OptBool(&mut self.manage_module),
            "manage_provider" => FieldSlot::OptBool(&mut self.manage_provider),
            "manage_vcs" => FieldSlot::OptBool(&mut self.manage_vcs),
            "manage_template" => FieldSlot::OptBool(&mut self.manage_template),
            _ => return None,
        })
    }
}
