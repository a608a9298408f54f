//! Hook candidates, normalized hooks, and hook sets.
//!
//! The collaborator sends [`HookCandidate`]s whose `rank` and
//! `isRecommended` may be missing. [`normalize_candidates`] fills those in
//! once, at ingestion, and groups the list into a [`HookSet`]. Everything
//! downstream only ever sees [`Hook`], where both fields are always present.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::HookId;

use super::ProjectError;

/// One of the three hook modalities of the multi-channel flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookChannel {
    /// On-screen / thumbnail text.
    Text,
    /// Spoken script opener.
    Verbal,
    /// Opening shot.
    Visual,
}

impl HookChannel {
    /// Channels in selection order.
    pub const ALL: [HookChannel; 3] = [HookChannel::Text, HookChannel::Verbal, HookChannel::Visual];

    /// The channel selected after this one, if any.
    pub fn next(&self) -> Option<HookChannel> {
        match self {
            HookChannel::Text => Some(HookChannel::Verbal),
            HookChannel::Verbal => Some(HookChannel::Visual),
            HookChannel::Visual => None,
        }
    }

    /// Channels that come strictly before this one.
    pub fn preceding(&self) -> &'static [HookChannel] {
        match self {
            HookChannel::Text => &[],
            HookChannel::Verbal => &[HookChannel::Text],
            HookChannel::Visual => &[HookChannel::Text, HookChannel::Verbal],
        }
    }

    /// Channels that come strictly after this one.
    pub fn following(&self) -> &'static [HookChannel] {
        match self {
            HookChannel::Text => &[HookChannel::Verbal, HookChannel::Visual],
            HookChannel::Verbal => &[HookChannel::Visual],
            HookChannel::Visual => &[],
        }
    }
}

impl fmt::Display for HookChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HookChannel::Text => "text",
            HookChannel::Verbal => "verbal",
            HookChannel::Visual => "visual",
        };
        write!(f, "{}", s)
    }
}

/// Which hook-selection flow a project runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowMode {
    /// One hook chosen from a single ranked list.
    #[default]
    Single,
    /// One hook per channel: text, then verbal, then visual.
    Channels,
}

/// Channel-specific descriptive fields.
///
/// Verbal hooks carry the emotional and retention triggers; visual hooks
/// carry the scene and the two production guides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_description: Option<String>,
    /// Film-it-yourself guide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiy_guide: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gen_ai_prompt: Option<String>,
}

/// A hook as received from the collaborator, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookCandidate {
    pub id: String,
    #[serde(rename = "type", default)]
    pub hook_type: String,
    #[serde(alias = "text", default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recommended: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<HookChannel>,
    #[serde(flatten)]
    pub details: HookDetails,
}

impl HookCandidate {
    /// Creates an unranked candidate with no channel.
    pub fn new(id: impl Into<String>, hook_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hook_type: hook_type.into(),
            content: content.into(),
            preview: None,
            rank: None,
            is_recommended: None,
            channel: None,
            details: HookDetails::default(),
        }
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_recommended(mut self, recommended: bool) -> Self {
        self.is_recommended = Some(recommended);
        self
    }

    pub fn with_channel(mut self, channel: HookChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    pub fn with_details(mut self, details: HookDetails) -> Self {
        self.details = details;
        self
    }
}

/// A normalized hook: rank and recommendation are always known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hook {
    pub id: HookId,
    #[serde(rename = "type")]
    pub hook_type: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub rank: u32,
    pub is_recommended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<HookChannel>,
    #[serde(flatten)]
    pub details: HookDetails,
}

/// The hook candidates currently offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HookSet {
    Single {
        hooks: Vec<Hook>,
    },
    Channels {
        text: Vec<Hook>,
        verbal: Vec<Hook>,
        visual: Vec<Hook>,
    },
}

impl HookSet {
    /// Flow mode implied by this set.
    pub fn mode(&self) -> FlowMode {
        match self {
            HookSet::Single { .. } => FlowMode::Single,
            HookSet::Channels { .. } => FlowMode::Channels,
        }
    }

    /// Hooks offered for a selection stage.
    ///
    /// `None` asks for the single-flow list; `Some(channel)` asks for that
    /// channel's list. Returns `None` when the request does not match the
    /// set's flow mode.
    pub fn candidates(&self, channel: Option<HookChannel>) -> Option<&[Hook]> {
        match (self, channel) {
            (HookSet::Single { hooks }, None) => Some(hooks),
            (HookSet::Channels { text, .. }, Some(HookChannel::Text)) => Some(text),
            (HookSet::Channels { verbal, .. }, Some(HookChannel::Verbal)) => Some(verbal),
            (HookSet::Channels { visual, .. }, Some(HookChannel::Visual)) => Some(visual),
            _ => None,
        }
    }

    /// Finds a hook by id within one stage's list.
    pub fn find(&self, channel: Option<HookChannel>, id: &HookId) -> Option<&Hook> {
        self.candidates(channel)?.iter().find(|h| &h.id == id)
    }

    /// Iterates every hook in the set.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Hook> + '_> {
        match self {
            HookSet::Single { hooks } => Box::new(hooks.iter()),
            HookSet::Channels {
                text,
                verbal,
                visual,
            } => Box::new(text.iter().chain(verbal.iter()).chain(visual.iter())),
        }
    }

    /// Total number of hooks in the set.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-channel selections of the multi-channel flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSelections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Hook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbal: Option<Hook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<Hook>,
}

impl ChannelSelections {
    pub fn get(&self, channel: HookChannel) -> Option<&Hook> {
        match channel {
            HookChannel::Text => self.text.as_ref(),
            HookChannel::Verbal => self.verbal.as_ref(),
            HookChannel::Visual => self.visual.as_ref(),
        }
    }

    pub(crate) fn set(&mut self, channel: HookChannel, hook: Option<Hook>) {
        match channel {
            HookChannel::Text => self.text = hook,
            HookChannel::Verbal => self.verbal = hook,
            HookChannel::Visual => self.visual = hook,
        }
    }

    /// True when every channel has a selection.
    pub fn is_complete(&self) -> bool {
        HookChannel::ALL.iter().all(|c| self.get(*c).is_some())
    }

    /// True when no channel has a selection.
    pub fn is_empty(&self) -> bool {
        HookChannel::ALL.iter().all(|c| self.get(*c).is_none())
    }
}

/// The hook(s) content generation is based on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HookChoice {
    Single {
        hook: Hook,
    },
    Channels {
        text: Hook,
        verbal: Hook,
        visual: Hook,
    },
}

/// Normalizes a received candidate list into a [`HookSet`].
///
/// - the list must be non-empty and ids unique;
/// - either no candidate has a channel (single flow) or all do, with every
///   channel represented (multi-channel flow);
/// - a missing rank becomes the 1-based position within its list;
/// - a missing recommendation becomes `rank == 1`;
/// - each list ends up stably sorted by rank.
pub fn normalize_candidates(candidates: Vec<HookCandidate>) -> Result<HookSet, ProjectError> {
    if candidates.is_empty() {
        return Err(ProjectError::invalid_input("hooks", "Hook list cannot be empty"));
    }

    let mut seen = HashSet::new();
    for candidate in &candidates {
        if !seen.insert(candidate.id.as_str()) {
            return Err(ProjectError::invalid_input(
                "hooks",
                format!("Duplicate hook id '{}'", candidate.id),
            ));
        }
    }

    let with_channel = candidates.iter().filter(|c| c.channel.is_some()).count();

    if with_channel == 0 {
        return Ok(HookSet::Single {
            hooks: rank_list(candidates)?,
        });
    }

    if with_channel != candidates.len() {
        return Err(ProjectError::invalid_input(
            "hooks",
            "Either every hook or no hook must carry a channel",
        ));
    }

    let mut text = Vec::new();
    let mut verbal = Vec::new();
    let mut visual = Vec::new();
    for candidate in candidates {
        match candidate.channel {
            Some(HookChannel::Text) => text.push(candidate),
            Some(HookChannel::Verbal) => verbal.push(candidate),
            Some(HookChannel::Visual) => visual.push(candidate),
            None => unreachable!("channel presence checked above"),
        }
    }

    for (channel, list) in [
        (HookChannel::Text, &text),
        (HookChannel::Verbal, &verbal),
        (HookChannel::Visual, &visual),
    ] {
        if list.is_empty() {
            return Err(ProjectError::invalid_input(
                "hooks",
                format!("No {} hooks received", channel),
            ));
        }
    }

    Ok(HookSet::Channels {
        text: rank_list(text)?,
        verbal: rank_list(verbal)?,
        visual: rank_list(visual)?,
    })
}

fn rank_list(candidates: Vec<HookCandidate>) -> Result<Vec<Hook>, ProjectError> {
    let mut hooks = candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let rank = candidate.rank.unwrap_or(index as u32 + 1);
            if rank == 0 {
                return Err(ProjectError::invalid_input(
                    "rank",
                    format!("Hook '{}' has rank 0; ranks start at 1", candidate.id),
                ));
            }
            let id = HookId::new(candidate.id)?;
            Ok(Hook {
                id,
                hook_type: candidate.hook_type,
                content: candidate.content,
                preview: candidate.preview,
                rank,
                is_recommended: candidate.is_recommended.unwrap_or(rank == 1),
                channel: candidate.channel,
                details: candidate.details,
            })
        })
        .collect::<Result<Vec<_>, ProjectError>>()?;

    hooks.sort_by_key(|h| h.rank);
    Ok(hooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(hooks: &[Hook]) -> Vec<&str> {
        hooks.iter().map(|h| h.id.as_str()).collect()
    }

    fn single(set: HookSet) -> Vec<Hook> {
        match set {
            HookSet::Single { hooks } => hooks,
            other => panic!("expected single set, got {:?}", other),
        }
    }

    #[test]
    fn missing_ranks_follow_received_order() {
        let hooks = single(
            normalize_candidates(vec![
                HookCandidate::new("x", "question", "Ever wondered?"),
                HookCandidate::new("y", "statistic", "9 out of 10"),
            ])
            .unwrap(),
        );

        assert_eq!(hooks[0].id.as_str(), "x");
        assert_eq!(hooks[0].rank, 1);
        assert!(hooks[0].is_recommended);
        assert_eq!(hooks[1].id.as_str(), "y");
        assert_eq!(hooks[1].rank, 2);
        assert!(!hooks[1].is_recommended);
    }

    #[test]
    fn explicit_ranks_are_kept_and_sorted() {
        let hooks = single(
            normalize_candidates(vec![
                HookCandidate::new("a", "story", "Once").with_rank(3),
                HookCandidate::new("b", "bold", "Stop").with_rank(1),
                HookCandidate::new("c", "insight", "Here's why").with_rank(2),
            ])
            .unwrap(),
        );

        assert_eq!(ids(&hooks), vec!["b", "c", "a"]);
        assert!(hooks[0].is_recommended);
        assert!(!hooks[1].is_recommended);
    }

    #[test]
    fn explicit_recommendation_wins_over_fallback() {
        let hooks = single(
            normalize_candidates(vec![
                HookCandidate::new("a", "story", "Once").with_recommended(false),
                HookCandidate::new("b", "bold", "Stop").with_recommended(true),
            ])
            .unwrap(),
        );

        assert!(!hooks[0].is_recommended);
        assert!(hooks[1].is_recommended);
    }

    #[test]
    fn empty_list_is_invalid_input() {
        let err = normalize_candidates(vec![]).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidInput { .. }));
    }

    #[test]
    fn zero_rank_is_rejected() {
        let err = normalize_candidates(vec![HookCandidate::new("a", "t", "c").with_rank(0)])
            .unwrap_err();
        assert!(matches!(err, ProjectError::InvalidInput { ref field, .. } if field == "rank"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = normalize_candidates(vec![
            HookCandidate::new("a", "t", "one"),
            HookCandidate::new("a", "t", "two"),
        ])
        .unwrap_err();
        assert!(matches!(err, ProjectError::InvalidInput { .. }));
    }

    #[test]
    fn blank_id_is_rejected() {
        let err = normalize_candidates(vec![HookCandidate::new(" ", "t", "c")]).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidInput { .. }));
    }

    #[test]
    fn channel_candidates_are_grouped_and_ranked_per_channel() {
        let set = normalize_candidates(vec![
            HookCandidate::new("t1", "bold", "Big text").with_channel(HookChannel::Text),
            HookCandidate::new("v1", "failure", "I failed").with_channel(HookChannel::Verbal),
            HookCandidate::new("t2", "question", "Why?").with_channel(HookChannel::Text),
            HookCandidate::new("s1", "reveal", "Slow pan").with_channel(HookChannel::Visual),
        ])
        .unwrap();

        assert_eq!(set.mode(), FlowMode::Channels);
        let text = set.candidates(Some(HookChannel::Text)).unwrap();
        assert_eq!(ids(text), vec!["t1", "t2"]);
        assert_eq!(text[1].rank, 2);
        let verbal = set.candidates(Some(HookChannel::Verbal)).unwrap();
        assert_eq!(verbal[0].rank, 1);
        assert!(verbal[0].is_recommended);
        assert!(set.candidates(None).is_none());
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn mixed_channel_presence_is_rejected() {
        let err = normalize_candidates(vec![
            HookCandidate::new("a", "t", "c").with_channel(HookChannel::Text),
            HookCandidate::new("b", "t", "c"),
        ])
        .unwrap_err();
        assert!(matches!(err, ProjectError::InvalidInput { .. }));
    }

    #[test]
    fn missing_channel_list_is_rejected() {
        let err = normalize_candidates(vec![
            HookCandidate::new("a", "t", "c").with_channel(HookChannel::Text),
            HookCandidate::new("b", "t", "c").with_channel(HookChannel::Verbal),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("visual"));
    }

    #[test]
    fn candidate_accepts_text_alias_and_camel_case() {
        let json = r#"{
            "id": "v1",
            "type": "shared_emotion",
            "text": "We've all been there",
            "channel": "verbal",
            "emotionalTrigger": "empathy",
            "isRecommended": true
        }"#;
        let candidate: HookCandidate = serde_json::from_str(json).unwrap();

        assert_eq!(candidate.content, "We've all been there");
        assert_eq!(candidate.channel, Some(HookChannel::Verbal));
        assert_eq!(candidate.details.emotional_trigger.as_deref(), Some("empathy"));
        assert_eq!(candidate.is_recommended, Some(true));
        assert!(candidate.rank.is_none());
    }

    #[test]
    fn normalized_hook_serializes_rank_and_recommendation() {
        let hooks = single(normalize_candidates(vec![HookCandidate::new("a", "bold", "Stop")]).unwrap());
        let json = serde_json::to_value(&hooks[0]).unwrap();

        assert_eq!(json["rank"], 1);
        assert_eq!(json["isRecommended"], true);
        assert_eq!(json["type"], "bold");
    }

    #[test]
    fn channel_order_helpers() {
        assert_eq!(HookChannel::Text.next(), Some(HookChannel::Verbal));
        assert_eq!(HookChannel::Visual.next(), None);
        assert_eq!(HookChannel::Visual.preceding(), &[HookChannel::Text, HookChannel::Verbal]);
        assert_eq!(HookChannel::Text.following(), &[HookChannel::Verbal, HookChannel::Visual]);
    }

    #[test]
    fn channel_selections_completeness() {
        let hook = single(normalize_candidates(vec![HookCandidate::new("a", "t", "c")]).unwrap())
            .remove(0);
        let mut selections = ChannelSelections::default();
        assert!(selections.is_empty());

        for channel in HookChannel::ALL {
            assert!(!selections.is_complete());
            selections.set(channel, Some(hook.clone()));
        }

        assert!(selections.is_complete());
        assert!(!selections.is_empty());
    }
}
