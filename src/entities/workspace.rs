//! Workspace resource - a checkout of infrastructure code inside an organization

use serde::{Deserialize, Serialize};

use crate::core::field::FieldSlot;
use crate::core::resource::{Relation, Resource, Tabular};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Repository URL the workspace checks out
    pub source: Option<String>,
    pub branch: Option<String>,
    /// Subdirectory of the repository to run in
    pub folder: Option<String>,
    pub iac_type: Option<String>,
    pub iac_version: Option<String>,
    pub execution_mode: Option<String>,
    pub organization: Option<Relation>,
    pub vcs: Option<Relation>,
}

impl Tabular for Workspace {
    const RELATIONS: &'static [&'static str] = &["organization", "vcs"];
}

impl Resource for Workspace {
    const NAME: &'static str = "workspace";

    fn id(&self) -> &str {
        &self.id
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldSlot<'_>> {
        Some(match name {
            "id" => FieldSlot::Str(&mut self.id),
            "name" => FieldSlot::OptStr(&mut self.name),
            "description" => FieldSlot::OptStr(&mut self.description),
            "source" => FieldSlot::OptStr(&mut self.source),
            "branch" => FieldSlot::OptStr(&mut self.branch),
            "folder" => FieldSlot::OptStr(&mut self.folder),
            "iac_type" => FieldSlot::OptStr(&mut self.iac_type),
            "iac_version" => FieldSlot::OptStr(&mut self.iac_version),
            "execution_mode" => FieldSlot::OptStr(&mut self.execution_mode),
            _ => return None,
        })
    }
}
