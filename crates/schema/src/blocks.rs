//! Flat configuration blocks
//!
//! Flat configuration only supports single-level maps and lists, so a nested
//! object that must appear exactly once is stored as a one-element list and an
//! unordered collection is stored as a set. [`ExactlyOne`] makes the first
//! convention explicit: it can only be built from (and deserialized from) a
//! list holding exactly one element.

use lex_provider_common::api::ContentType;
use lex_provider_common::{ProviderError, Result};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unwrap a single-element list into its sole value
///
/// Fails with [`ProviderError::Cardinality`] when the list is empty or holds
/// more than one element.
pub fn unwrap_single<T>(field: &str, list: Vec<T>) -> Result<T> {
    let found = list.len();
    let mut items = list.into_iter();
    match (items.next(), items.next()) {
        (Some(value), None) => Ok(value),
        _ => Err(ProviderError::Cardinality {
            field: field.to_string(),
            found,
        }),
    }
}

/// Wrap a value into the one-element list stored in flat configuration
pub fn wrap_single<T>(value: T) -> Vec<T> {
    vec![value]
}

/// A nested object with cardinality exactly one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactlyOne<T>(T);

impl<T> ExactlyOne<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Build from the flat one-element list representation
    pub fn from_list(field: &str, list: Vec<T>) -> Result<Self> {
        unwrap_single(field, list).map(Self)
    }

    pub fn get(&self) -> &T {
        &self.0
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn into_list(self) -> Vec<T> {
        wrap_single(self.0)
    }
}

impl<T> From<T> for ExactlyOne<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Serialize> Serialize for ExactlyOne<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1))?;
        seq.serialize_element(&self.0)?;
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ExactlyOne<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let list = Vec::<T>::deserialize(deserializer)?;
        let len = list.len();
        let mut items = list.into_iter();
        match (items.next(), items.next()) {
            (Some(value), None) => Ok(Self(value)),
            _ => Err(de::Error::invalid_length(len, &"a list with exactly one element")),
        }
    }
}

/// A message alternative
///
/// `group_number` of `Some(0)` is treated the same as `None` when expanding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageBlock {
    pub content: String,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_number: Option<i64>,
}

impl MessageBlock {
    pub fn new(content: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            content: content.into(),
            content_type,
            group_number: None,
        }
    }

    pub fn with_group(mut self, group_number: i64) -> Self {
        self.group_number = Some(group_number);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementBlock {
    pub message: BTreeSet<MessageBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_card: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptBlock {
    pub max_attempts: i64,
    pub message: BTreeSet<MessageBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_card: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntentBlock {
    pub intent_name: String,
    pub intent_version: String,
}

impl IntentBlock {
    pub fn new(intent_name: impl Into<String>, intent_version: impl Into<String>) -> Self {
        Self {
            intent_name: intent_name.into(),
            intent_version: intent_version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_wrap_then_unwrap_is_identity() {
        let mut map = HashMap::new();
        map.insert("response_card".to_string(), "{}".to_string());

        let wrapped = wrap_single(map.clone());
        assert_eq!(wrapped.len(), 1);
        assert_eq!(unwrap_single("abort_statement", wrapped).unwrap(), map);
    }

    #[test]
    fn test_unwrap_empty_list_fails() {
        let err = unwrap_single::<MessageBlock>("abort_statement", vec![]).unwrap_err();
        match err {
            ProviderError::Cardinality { field, found } => {
                assert_eq!(field, "abort_statement");
                assert_eq!(found, 0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unwrap_two_items_fails() {
        let result = ExactlyOne::from_list("clarification_prompt", vec![1, 2]);
        assert!(matches!(
            result,
            Err(ProviderError::Cardinality { found: 2, .. })
        ));
    }

    #[test]
    fn test_exactly_one_serializes_as_list() {
        let one = ExactlyOne::new(IntentBlock::new("OrderFlowers", "$LATEST"));
        let json = serde_json::to_value(&one).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"intent_name": "OrderFlowers", "intent_version": "$LATEST"}])
        );

        let back: ExactlyOne<IntentBlock> = serde_json::from_value(json).unwrap();
        assert_eq!(back, one);
    }

    #[test]
    fn test_exactly_one_rejects_empty_list() {
        let result: std::result::Result<ExactlyOne<IntentBlock>, _> =
            serde_json::from_str("[]");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("exactly one element"), "{}", err);
    }

    #[test]
    fn test_message_set_ignores_order_and_duplicates() {
        let a = MessageBlock::new("Hello", ContentType::PlainText);
        let b = MessageBlock::new("<speak>Hi</speak>", ContentType::Ssml).with_group(2);

        let first: BTreeSet<_> = [a.clone(), b.clone()].into_iter().collect();
        let second: BTreeSet<_> = [b, a.clone(), a].into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_message_rejects_unknown_content_type() {
        let result: std::result::Result<MessageBlock, _> = serde_json::from_str(
            r#"{"content": "Hello", "content_type": "Markdown"}"#,
        );
        assert!(result.is_err());
    }
}
