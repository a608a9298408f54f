//! Creative brief gathered during the conversation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key/value creative brief.
///
/// The well-known keys are typed; anything else the collaborator extracts
/// lands in `extra`. Merging is shallow and never removes a key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl UserInputs {
    pub fn with_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            ..Self::default()
        }
    }

    /// Shallow merge: present keys in `partial` overwrite, absent keys are
    /// kept. Explicit JSON nulls in `extra` count as absent.
    pub fn merge(&mut self, partial: UserInputs) {
        fn take<T>(slot: &mut Option<T>, incoming: Option<T>) {
            if let Some(value) = incoming {
                *slot = Some(value);
            }
        }

        take(&mut self.topic, partial.topic);
        take(&mut self.audience, partial.audience);
        take(&mut self.platform, partial.platform);
        take(&mut self.goal, partial.goal);
        take(&mut self.tone, partial.tone);
        take(&mut self.duration, partial.duration);
        take(&mut self.style, partial.style);
        take(&mut self.key_points, partial.key_points);

        for (key, value) in partial.extra {
            if !value.is_null() {
                self.extra.insert(key, value);
            }
        }
    }

    /// Returns a merged copy.
    pub fn merged(&self, partial: UserInputs) -> Self {
        let mut next = self.clone();
        next.merge(partial);
        next
    }

    /// True when a non-blank topic is present.
    pub fn has_topic(&self) -> bool {
        self.topic.as_deref().map_or(false, |t| !t.trim().is_empty())
    }

    /// True when nothing has been gathered yet.
    pub fn is_empty(&self) -> bool {
        self == &UserInputs::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_overwrites_present_and_keeps_absent() {
        let mut inputs = UserInputs {
            topic: Some("coffee".into()),
            tone: Some("calm".into()),
            ..Default::default()
        };

        inputs.merge(UserInputs {
            tone: Some("playful".into()),
            platform: Some("tiktok".into()),
            ..Default::default()
        });

        assert_eq!(inputs.topic.as_deref(), Some("coffee"));
        assert_eq!(inputs.tone.as_deref(), Some("playful"));
        assert_eq!(inputs.platform.as_deref(), Some("tiktok"));
    }

    #[test]
    fn merge_accumulates_extra_keys() {
        let mut inputs: UserInputs = serde_json::from_value(json!({"a": 1})).unwrap();
        inputs.merge(serde_json::from_value(json!({"b": 2})).unwrap());

        assert_eq!(inputs.extra.get("a"), Some(&json!(1)));
        assert_eq!(inputs.extra.get("b"), Some(&json!(2)));
    }

    #[test]
    fn merge_ignores_nulls() {
        let mut inputs: UserInputs =
            serde_json::from_value(json!({"topic": "bread", "hashtag": "#yum"})).unwrap();
        inputs.merge(serde_json::from_value(json!({"topic": null, "hashtag": null})).unwrap());

        assert_eq!(inputs.topic.as_deref(), Some("bread"));
        assert_eq!(inputs.extra.get("hashtag"), Some(&json!("#yum")));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let inputs = UserInputs::with_topic("bikes");
        assert_eq!(inputs.merged(UserInputs::default()), inputs);
    }

    #[test]
    fn key_points_use_camel_case_on_the_wire() {
        let inputs: UserInputs =
            serde_json::from_value(json!({"keyPoints": ["one", "two"]})).unwrap();
        assert_eq!(inputs.key_points, Some(vec!["one".to_string(), "two".to_string()]));
        assert!(inputs.extra.is_empty());

        let back = serde_json::to_value(&inputs).unwrap();
        assert_eq!(back, json!({"keyPoints": ["one", "two"]}));
    }

    #[test]
    fn blank_topic_does_not_count() {
        assert!(!UserInputs::with_topic("   ").has_topic());
        assert!(UserInputs::with_topic("dogs").has_topic());
        assert!(!UserInputs::default().has_topic());
    }
}
