//! Organization resource - top-level tenant

use serde::{Deserialize, Serialize};

use crate::core::field::FieldSlot;
use crate::core::resource::{Resource, Tabular};

/// An organization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Where runs execute by default ("remote", "local" or "agent")
    pub execution_mode: Option<String>,
    pub icon: Option<String>,
    pub disabled: Option<bool>,
}

impl Tabular for Organization {}

impl Resource for Organization {
    const NAME: &'static str = "organization";

    fn id(&self) -> &str {
        &self.id
    }

    fn field_mut(&mut self, name: &str) -> Option<FieldSlot<'_>> {
        Some(match name {
            "id" => FieldSlot::Str(&mut self.id),
            "name" => FieldSlot::OptStr(&mut self.name),
            "description" => FieldSlot::OptStr(&mut self.description),
            "execution_mode" => FieldSlot::OptStr(&mut self.execution_mode),
            "icon" => FieldSlot::OptStr(&mut self.icon),
            "disabled" => FieldSlot::OptBool(&mut self.disabled),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attributes_default_to_none() {
        let org: Organization = serde_json::from_str(r#"{"id": "o-1", "name": "acme"}"#).unwrap();
        assert_eq!(org.id(), "o-1");
        assert_eq!(org.name.as_deref(), Some("acme"));
        assert_eq!(org.disabled, None);
    }

    #[test]
    fn test_unknown_attributes_are_ignored() {
        let org: Organization =
            serde_json::from_str(r#"{"id": "o-1", "created_at": "2024-01-01"}"#).unwrap();
        assert_eq!(org.id, "o-1");
    }
}
