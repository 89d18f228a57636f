//! Catalog of relation templates.
//!
//! A template describes the shape of a relation: the role of its leading
//! associate, an optional role repeated for every associate in the middle,
//! and the role of its trailing associate.

use crate::error::{ModelError, ModelResult};
use crate::relation::AssociateRole;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTemplate {
    pub leading: AssociateRole,

    /// Role of every associate between the first and the last one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repetitive: Option<AssociateRole>,

    pub trailing: AssociateRole,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RelationTemplate {
    pub fn new(leading: AssociateRole, trailing: AssociateRole) -> Self {
        Self {
            leading,
            repetitive: None,
            trailing,
            description: None,
        }
    }

    pub fn with_repetitive(mut self, role: AssociateRole) -> Self {
        self.repetitive = Some(role);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn can_have_more_than_two_associates(&self) -> bool {
        self.repetitive.is_some()
    }

    /// Roles for a relation with `count` associates, or `None` if this
    /// template cannot describe that many
    pub fn roles_for(&self, count: usize) -> Option<Vec<AssociateRole>> {
        match count {
            0 | 1 => None,
            2 => Some(vec![self.leading.clone(), self.trailing.clone()]),
            _ => {
                let middle = self.repetitive.as_ref()?;
                let mut roles = Vec::with_capacity(count);
                roles.push(self.leading.clone());
                roles.extend(std::iter::repeat(middle.clone()).take(count - 2));
                roles.push(self.trailing.clone());
                Some(roles)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTemplateGroup {
    pub templates: Vec<RelationTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationModel {
    pub groups: Vec<RelationTemplateGroup>,
}

impl RelationModel {
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let model: RelationModel = serde_json::from_str(json)?;
        if model.groups.iter().any(|group| group.templates.is_empty()) {
            return Err(ModelError::invalid_catalog("empty relation template group"));
        }
        Ok(model)
    }

    pub fn templates(&self) -> impl Iterator<Item = &RelationTemplate> {
        self.groups.iter().flat_map(|group| group.templates.iter())
    }
}

impl Default for RelationModel {
    fn default() -> Self {
        let high = AssociateRole::high;
        let low = AssociateRole::low;
        Self {
            groups: vec![
                RelationTemplateGroup {
                    templates: vec![
                        RelationTemplate::new(high("Series"), high("Series"))
                            .with_repetitive(high("Series"))
                            .with_description("Coordinated sequence"),
                        RelationTemplate::new(high("Alternative"), high("Alternative"))
                            .with_repetitive(high("Alternative")),
                    ],
                },
                RelationTemplateGroup {
                    templates: vec![
                        RelationTemplate::new(high("Action"), low("Purpose")),
                        RelationTemplate::new(low("Ground"), high("Inference")),
                        RelationTemplate::new(high("Inference"), low("Ground")),
                        RelationTemplate::new(low("Condition"), high("Consequence")),
                    ],
                },
                RelationTemplateGroup {
                    templates: vec![
                        RelationTemplate::new(high("Statement"), low("Explanation")),
                        RelationTemplate::new(low("Negative"), high("Positive")),
                    ],
                },
            ],
        }
    }
}
