//! Request and response types of the remote model building service
//!
//! These mirror the nested shapes the service expects: a bot owns an abort
//! statement, a clarification prompt and references to intents, and
//! statements and prompts own sets of alternative messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
    #[serde(rename = "SSML")]
    Ssml,
    CustomPayload,
}

impl ContentType {
    pub const ALL: [&'static str; 3] = ["PlainText", "SSML", "CustomPayload"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::PlainText => "PlainText",
            ContentType::Ssml => "SSML",
            ContentType::CustomPayload => "CustomPayload",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PlainText" => Ok(ContentType::PlainText),
            "SSML" => Ok(ContentType::Ssml),
            "CustomPayload" => Ok(ContentType::CustomPayload),
            other => Err(format!("unknown content type {:?}", other)),
        }
    }
}

/// What the service does after saving a bot
///
/// The service accepts this on put but never returns it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessBehavior {
    #[default]
    Save,
    Build,
}

impl ProcessBehavior {
    pub const ALL: [&'static str; 2] = ["SAVE", "BUILD"];
}

/// Bot locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    pub const ALL: [&'static str; 3] = ["en-US", "en-GB", "de-DE"];
}

/// A single message alternative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content: String,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_number: Option<i64>,
}

/// A one-shot set of messages with an optional response card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_card: Option<String>,
}

/// A statement that is repeated up to `max_attempts` times
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub max_attempts: i64,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_card: Option<String>,
}

/// Reference to an externally managed intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub intent_name: String,
    pub intent_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutBotInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub intents: Vec<Intent>,
    pub clarification_prompt: Prompt,
    pub abort_statement: Statement,
    #[serde(rename = "idleSessionTTLInSeconds")]
    pub idle_session_ttl_in_seconds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    pub process_behavior: ProcessBehavior,
    pub locale: Locale,
    pub child_directed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutBotOutput {
    pub name: String,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBotInput {
    pub name: String,
    pub version_or_alias: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBotOutput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub intents: Vec<Intent>,
    #[serde(default)]
    pub clarification_prompt: Option<Prompt>,
    #[serde(default)]
    pub abort_statement: Option<Statement>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default, rename = "idleSessionTTLInSeconds")]
    pub idle_session_ttl_in_seconds: Option<i64>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub locale: Option<Locale>,
    #[serde(default)]
    pub child_directed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteBotInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutBotAliasInput {
    pub name: String,
    pub bot_name: String,
    pub bot_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutBotAliasOutput {
    pub name: String,
    pub bot_name: String,
    pub bot_version: String,
    #[serde(default)]
    pub checksum: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBotAliasInput {
    pub name: String,
    pub bot_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBotAliasOutput {
    pub name: String,
    pub bot_name: String,
    pub bot_version: String,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBotAliasInput {
    pub name: String,
    pub bot_name: String,
}
