//! The generated content package.

use serde::{Deserialize, Serialize};

/// One line of the script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptLine {
    pub line_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One storyboard frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryboardFrame {
    pub frame_number: u32,
    #[serde(default)]
    pub shot_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_notes: Option<String>,
}

/// Production specifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechSpecs {
    #[serde(default)]
    pub aspect_ratio: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub frame_rate: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_format: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// Supplementary footage suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BRollItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One caption entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Script, storyboard, specs, b-roll and captions for one video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOutput {
    #[serde(default)]
    pub script: Vec<ScriptLine>,
    #[serde(default)]
    pub storyboard: Vec<StoryboardFrame>,
    #[serde(default)]
    pub tech_specs: TechSpecs,
    #[serde(default)]
    pub b_roll: Vec<BRollItem>,
    #[serde(default)]
    pub captions: Vec<Caption>,
}

impl ContentOutput {
    /// Returns the package with indexed sequences in display order.
    ///
    /// Script and storyboard sort by their index field. B-roll and captions
    /// carry free-form timestamps and keep the order they arrived in.
    pub fn normalized(mut self) -> Self {
        self.script.sort_by_key(|l| l.line_number);
        self.storyboard.sort_by_key(|f| f.frame_number);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
            && self.storyboard.is_empty()
            && self.b_roll.is_empty()
            && self.captions.is_empty()
    }
}
