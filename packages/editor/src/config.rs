use crate::errors::{EditError, EditResult};
use crate::undo_stack::DEFAULT_UNDO_LIMIT;
use hermeneutix_model::{LanguageModel, RelationModel};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "hermeneutix.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Number of undo levels kept per document (0 disables undo)
    #[serde(default = "default_undo_limit")]
    pub undo_limit: usize,

    /// JSON catalog of syntactical functions; the built-in one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_model_path: Option<String>,

    /// JSON catalog of relation templates; the built-in one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_model_path: Option<String>,
}

fn default_undo_limit() -> usize {
    DEFAULT_UNDO_LIMIT
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> EditResult<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded editor config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(EditorConfig::default())
        }
    }

    /// The configured language model, resolved against `cwd`
    pub fn language_model(&self, cwd: &Path) -> EditResult<LanguageModel> {
        match &self.language_model_path {
            Some(path) => {
                let content = std::fs::read_to_string(resolve(cwd, path))?;
                Ok(LanguageModel::from_json(&content)?)
            }
            None => Ok(LanguageModel::default()),
        }
    }

    /// The configured relation templates, resolved against `cwd`
    pub fn relation_model(&self, cwd: &Path) -> EditResult<RelationModel> {
        match &self.relation_model_path {
            Some(path) => {
                let content = std::fs::read_to_string(resolve(cwd, path))?;
                RelationModel::from_json(&content).map_err(EditError::from)
            }
            None => Ok(RelationModel::default()),
        }
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    cwd.join(path)
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_limit: default_undo_limit(),
            language_model_path: None,
            relation_model_path: None,
        }
    }
}
