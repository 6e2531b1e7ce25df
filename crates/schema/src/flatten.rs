//! Flatten pipeline: remote response objects into flat configuration blocks

use crate::blocks::{ExactlyOne, IntentBlock, MessageBlock, PromptBlock, StatementBlock};
use crate::resource_data::{BotAliasData, BotData};
use lex_provider_common::api::{
    GetBotAliasOutput, GetBotOutput, Intent, Message, ProcessBehavior, Prompt, Statement,
};
use lex_provider_common::constants::{BOT_IDLE_SESSION_TTL_DEFAULT, VERSION_LATEST};
use lex_provider_common::{ProviderError, Result};
use std::collections::BTreeSet;

/// Flatten messages into a set
///
/// A group number of zero on the wire reads back as absent.
pub fn flatten_messages(messages: &[Message]) -> BTreeSet<MessageBlock> {
    messages
        .iter()
        .map(|message| MessageBlock {
            content: message.content.clone(),
            content_type: message.content_type,
            group_number: message.group_number.filter(|&n| n != 0),
        })
        .collect()
}

pub fn flatten_statement(statement: &Statement) -> StatementBlock {
    StatementBlock {
        message: flatten_messages(&statement.messages),
        response_card: statement.response_card.clone(),
    }
}

pub fn flatten_prompt(prompt: &Prompt) -> PromptBlock {
    PromptBlock {
        max_attempts: prompt.max_attempts,
        message: flatten_messages(&prompt.messages),
        response_card: prompt.response_card.clone(),
    }
}

pub fn flatten_intents(intents: &[Intent]) -> BTreeSet<IntentBlock> {
    intents
        .iter()
        .map(|intent| IntentBlock {
            intent_name: intent.intent_name.clone(),
            intent_version: intent.intent_version.clone(),
        })
        .collect()
}

/// Build a bot record from a get response
///
/// The service never returns the process behavior, so the caller passes the
/// last configured value through.
pub fn flatten_bot(resp: GetBotOutput, process_behavior: ProcessBehavior) -> Result<BotData> {
    let abort_statement = resp
        .abort_statement
        .as_ref()
        .map(flatten_statement)
        .ok_or_else(|| missing("abort_statement"))?;
    let clarification_prompt = resp
        .clarification_prompt
        .as_ref()
        .map(flatten_prompt)
        .ok_or_else(|| missing("clarification_prompt"))?;

    Ok(BotData {
        id: Some(resp.name.clone()),
        intent: flatten_intents(&resp.intents),
        abort_statement: ExactlyOne::new(abort_statement),
        clarification_prompt: ExactlyOne::new(clarification_prompt),
        description: resp.description.unwrap_or_default(),
        child_directed: resp.child_directed.unwrap_or_default(),
        idle_session_ttl_in_seconds: resp
            .idle_session_ttl_in_seconds
            .unwrap_or(BOT_IDLE_SESSION_TTL_DEFAULT),
        locale: resp.locale.unwrap_or_default(),
        process_behavior,
        version: resp.version.unwrap_or_else(|| VERSION_LATEST.to_string()),
        voice_id: resp.voice_id,
        checksum: resp.checksum,
        status: resp.status,
        failure_reason: resp.failure_reason,
        name: resp.name,
    })
}

pub fn flatten_bot_alias(resp: GetBotAliasOutput) -> BotAliasData {
    BotAliasData {
        id: Some(resp.name.clone()),
        bot_name: resp.bot_name,
        bot_version: resp.bot_version,
        name: resp.name,
        description: resp.description.unwrap_or_default(),
        checksum: resp.checksum,
    }
}

fn missing(field: &str) -> ProviderError {
    ProviderError::Cardinality {
        field: field.to_string(),
        found: 0,
    }
}
