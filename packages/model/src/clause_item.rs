use crate::ids::ClauseItemId;
use crate::language::SyntacticalFunction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
    BoldItalic,
}

/// Smallest unit of analysed text: a word or phrase of the origin text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseItem {
    pub id: ClauseItemId,

    pub origin_text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<SyntacticalFunction>,

    #[serde(default)]
    pub font_style: FontStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ClauseItem {
    pub fn new(id: ClauseItemId, origin_text: impl Into<String>) -> Self {
        Self {
            id,
            origin_text: origin_text.into(),
            function: None,
            font_style: FontStyle::Plain,
            comment: None,
        }
    }
}
