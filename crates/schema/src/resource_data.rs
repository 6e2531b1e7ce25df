//! Flat state records for the bot and bot alias resources
//!
//! A record holds the configured attributes, the computed attributes echoed
//! back by the remote service, and the resource identity. `id == None` means
//! the resource is absent.

use crate::blocks::{ExactlyOne, IntentBlock, PromptBlock, StatementBlock};
use lex_provider_common::api::{Locale, ProcessBehavior};
use lex_provider_common::constants::{BOT_IDLE_SESSION_TTL_DEFAULT, VERSION_LATEST};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

fn default_idle_session_ttl() -> i64 {
    BOT_IDLE_SESSION_TTL_DEFAULT
}

fn default_version() -> String {
    VERSION_LATEST.to_string()
}

/// Bot resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub child_directed: bool,
    #[serde(default = "default_idle_session_ttl")]
    pub idle_session_ttl_in_seconds: i64,
    pub abort_statement: ExactlyOne<StatementBlock>,
    pub clarification_prompt: ExactlyOne<PromptBlock>,
    pub intent: BTreeSet<IntentBlock>,
    #[serde(default)]
    pub locale: Locale,
    /// Sent on every put, never returned by the service
    #[serde(default)]
    pub process_behavior: ProcessBehavior,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl BotData {
    /// A record with every optional attribute at its default
    pub fn new(
        name: impl Into<String>,
        abort_statement: StatementBlock,
        clarification_prompt: PromptBlock,
        intent: BTreeSet<IntentBlock>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            child_directed: false,
            idle_session_ttl_in_seconds: default_idle_session_ttl(),
            abort_statement: ExactlyOne::new(abort_statement),
            clarification_prompt: ExactlyOne::new(clarification_prompt),
            intent,
            locale: Locale::default(),
            process_behavior: ProcessBehavior::default(),
            version: default_version(),
            voice_id: None,
            checksum: None,
            status: None,
            failure_reason: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.id.is_some()
    }
}

/// Bot alias resource record, keyed by `(bot_name, name)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotAliasData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub bot_name: String,
    #[serde(default)]
    pub bot_version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl BotAliasData {
    pub fn new(
        bot_name: impl Into<String>,
        bot_version: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            bot_name: bot_name.into(),
            bot_version: bot_version.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_present(&self) -> bool {
        self.id.is_some()
    }
}
