//! # Language Models
//!
//! A language model is a read-only catalog of syntactical functions that can
//! be assigned to clause items and indented propositions. Functions may be
//! grouped; groups only exist for presentation and are never assigned.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An assignable syntactical function
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyntacticalFunction {
    /// Unique code inside its language model (e.g. "S" for subject)
    pub code: String,

    /// Display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether propositions with this function are shown underlined
    #[serde(default)]
    pub underlined: bool,
}

impl SyntacticalFunction {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            underlined: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underlined = true;
        self
    }
}

/// Named group of functions and nested groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntacticalFunctionGroup {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub children: Vec<FunctionElement>,
}

/// Node of the function catalog tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FunctionElement {
    Function(SyntacticalFunction),
    Group(SyntacticalFunctionGroup),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageModel {
    pub name: String,

    /// Text orientation of the origin language
    #[serde(default = "default_left_to_right")]
    pub left_to_right: bool,

    pub functions: Vec<FunctionElement>,
}

fn default_left_to_right() -> bool {
    true
}

impl LanguageModel {
    /// Build a language model, rejecting duplicate function codes
    pub fn new(
        name: impl Into<String>,
        left_to_right: bool,
        functions: Vec<FunctionElement>,
    ) -> ModelResult<Self> {
        let model = Self {
            name: name.into(),
            left_to_right,
            functions,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        let model: LanguageModel = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Check that every function code is unique and no group is empty
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::invalid_catalog("language model without a name"));
        }
        let mut codes = HashSet::new();
        let mut pending: Vec<&FunctionElement> = self.functions.iter().collect();
        while let Some(element) = pending.pop() {
            match element {
                FunctionElement::Function(function) => {
                    if !codes.insert(function.code.as_str()) {
                        return Err(ModelError::invalid_catalog(format!(
                            "duplicate function code '{}' in language model '{}'",
                            function.code, self.name
                        )));
                    }
                }
                FunctionElement::Group(group) => {
                    if group.children.is_empty() {
                        return Err(ModelError::invalid_catalog(format!(
                            "empty function group '{}'",
                            group.name
                        )));
                    }
                    pending.extend(group.children.iter());
                }
            }
        }
        Ok(())
    }

    /// All assignable functions in catalog order
    pub fn all_functions(&self) -> Vec<&SyntacticalFunction> {
        fn collect<'a>(elements: &'a [FunctionElement], into: &mut Vec<&'a SyntacticalFunction>) {
            for element in elements {
                match element {
                    FunctionElement::Function(function) => into.push(function),
                    FunctionElement::Group(group) => collect(&group.children, into),
                }
            }
        }

        let mut functions = Vec::new();
        collect(&self.functions, &mut functions);
        functions
    }

    pub fn find_function(&self, code: &str) -> Option<&SyntacticalFunction> {
        self.all_functions().into_iter().find(|f| f.code == code)
    }
}

impl Default for LanguageModel {
    /// Small general-purpose catalog used when no language is configured
    fn default() -> Self {
        let function = |code: &str, name: &str| FunctionElement::Function(SyntacticalFunction::new(code, name));
        Self {
            name: "Default".to_string(),
            left_to_right: true,
            functions: vec![
                FunctionElement::Group(SyntacticalFunctionGroup {
                    name: "Clause parts".to_string(),
                    description: None,
                    children: vec![
                        function("S", "Subject"),
                        function("P", "Predicate"),
                        function("O", "Object"),
                        function("A", "Adverbial"),
                    ],
                }),
                FunctionElement::Group(SyntacticalFunctionGroup {
                    name: "Subordinate clauses".to_string(),
                    description: None,
                    children: vec![
                        function("Rel", "Relative clause"),
                        function("Cond", "Conditional clause"),
                        function("Caus", "Causal clause"),
                        function("Fin", "Final clause"),
                        function("Temp", "Temporal clause"),
                    ],
                }),
                FunctionElement::Function(
                    SyntacticalFunction::new("Part", "Participle").underlined(),
                ),
            ],
        }
    }
}
