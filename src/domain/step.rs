//! Step kinds and prompt construction

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// The closed set of text-transformation steps a pipeline may contain.
///
/// Adding a kind means adding a prompt template in [`build_prompt`]; the
/// compiler enforces the mapping stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Normalize whitespace and fix basic grammar
    Clean,

    /// Condense the text to a short summary
    Summarize,

    /// Pull out key points as a bullet list
    Extract,

    /// Classify the text into a single category
    Tag,
}

impl StepKind {
    /// All kinds, in a stable order
    pub const ALL: [StepKind; 4] = [Self::Clean, Self::Summarize, Self::Extract, Self::Tag];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Summarize => "summarize",
            Self::Extract => "extract",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clean" => Ok(Self::Clean),
            "summarize" => Ok(Self::Summarize),
            "extract" => Ok(Self::Extract),
            "tag" => Ok(Self::Tag),
            other => Err(EngineError::unknown_step_kind(other)),
        }
    }
}

/// Build the provider prompt for one step.
///
/// Every template embeds `text` verbatim and instructs the provider to
/// return only the transformed content, since the output is fed verbatim
/// into the next step's prompt.
pub fn build_prompt(kind: StepKind, text: &str) -> String {
    match kind {
        StepKind::Clean => format!(
            "Clean the following text by removing extra whitespace and fixing basic \
             grammar. Return only the cleaned text without any additional commentary:\n\n{text}"
        ),
        StepKind::Summarize => format!(
            "Summarize the following text into approximately 5 lines. Be concise and \
             capture the main points. Return only the summary without any additional \
             commentary:\n\n{text}"
        ),
        StepKind::Extract => format!(
            "Extract the key points from the following text and return them as bullet \
             points. Each point should be on a new line starting with a bullet (\u{2022}). \
             Return only the bullet points, nothing else:\n\n{text}"
        ),
        StepKind::Tag => format!(
            "Classify the following text into ONE of these categories: Technology, \
             Finance, Health, Education, or Other. Return ONLY the category name, \
             nothing else:\n\n{text}"
        ),
    }
}
