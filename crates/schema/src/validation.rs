//! Validation of flat resource records against the schema descriptors
//!
//! Every violation is collected, so a single call reports all of them.

use crate::blocks::{MessageBlock, PromptBlock, StatementBlock};
use crate::descriptors::{
    AttributeSchema, BlockSchema, ABORT_STATEMENT, ALIAS_BOT_NAME, ALIAS_BOT_VERSION, ALIAS_NAME,
    BOT_IDLE_SESSION_TTL, BOT_NAME, BOT_VERSION, CLARIFICATION_PROMPT, DESCRIPTION, INTENT,
    INTENT_NAME, INTENT_VERSION, MESSAGE, MESSAGE_CONTENT, MESSAGE_GROUP_NUMBER,
    PROMPT_MAX_ATTEMPTS, RESPONSE_CARD,
};
use crate::resource_data::{BotAliasData, BotData};
use lex_provider_common::{FieldError, Result, ValidationErrors};
use std::collections::BTreeSet;

/// Validate a bot record before it is sent
pub fn validate_bot(data: &BotData) -> Result<()> {
    let mut errors = ValidationErrors::default();

    check_str(&mut errors, "", &BOT_NAME, &data.name);
    check_str(&mut errors, "", &DESCRIPTION, &data.description);
    check_int(
        &mut errors,
        "",
        &BOT_IDLE_SESSION_TTL,
        data.idle_session_ttl_in_seconds,
    );
    check_str(&mut errors, "", &BOT_VERSION, &data.version);

    validate_statement(
        &mut errors,
        &format!("{}.0", ABORT_STATEMENT.name),
        data.abort_statement.get(),
    );
    validate_prompt(
        &mut errors,
        &format!("{}.0", CLARIFICATION_PROMPT.name),
        data.clarification_prompt.get(),
    );

    check_items(&mut errors, "", &INTENT, data.intent.len());
    for (i, intent) in data.intent.iter().enumerate() {
        let path = format!("{}.{}", INTENT.name, i);
        check_str(&mut errors, &path, &INTENT_NAME, &intent.intent_name);
        check_str(&mut errors, &path, &INTENT_VERSION, &intent.intent_version);
    }

    errors.into_result()
}

/// Validate a bot alias record before it is sent
pub fn validate_bot_alias(data: &BotAliasData) -> Result<()> {
    let mut errors = ValidationErrors::default();

    check_str(&mut errors, "", &ALIAS_BOT_NAME, &data.bot_name);
    check_str(&mut errors, "", &ALIAS_BOT_VERSION, &data.bot_version);
    check_str(&mut errors, "", &ALIAS_NAME, &data.name);
    check_str(&mut errors, "", &DESCRIPTION, &data.description);

    errors.into_result()
}

fn validate_statement(errors: &mut ValidationErrors, path: &str, statement: &StatementBlock) {
    validate_messages(errors, path, &statement.message);
    check_response_card(errors, path, statement.response_card.as_deref());
}

fn validate_prompt(errors: &mut ValidationErrors, path: &str, prompt: &PromptBlock) {
    check_int(errors, path, &PROMPT_MAX_ATTEMPTS, prompt.max_attempts);
    validate_messages(errors, path, &prompt.message);
    check_response_card(errors, path, prompt.response_card.as_deref());
}

fn validate_messages(errors: &mut ValidationErrors, path: &str, messages: &BTreeSet<MessageBlock>) {
    check_items(errors, path, &MESSAGE, messages.len());

    for (i, message) in messages.iter().enumerate() {
        let path = join(path, &format!("{}.{}", MESSAGE.name, i));
        check_str(errors, &path, &MESSAGE_CONTENT, &message.content);

        // zero means unset
        if let Some(group_number) = message.group_number.filter(|&n| n != 0) {
            check_int(errors, &path, &MESSAGE_GROUP_NUMBER, group_number);
        }
    }
}

fn check_response_card(errors: &mut ValidationErrors, path: &str, response_card: Option<&str>) {
    if let Some(card) = response_card.filter(|c| !c.is_empty()) {
        check_str(errors, path, &RESPONSE_CARD, card);
    }
}

fn check_str(errors: &mut ValidationErrors, path: &str, attr: &AttributeSchema, value: &str) {
    if let Err(message) = attr.validate_str(value) {
        errors.push(FieldError::new(join(path, attr.name), message));
    }
}

fn check_int(errors: &mut ValidationErrors, path: &str, attr: &AttributeSchema, value: i64) {
    if let Err(message) = attr.validate_int(value) {
        errors.push(FieldError::new(join(path, attr.name), message));
    }
}

fn check_items(errors: &mut ValidationErrors, path: &str, block: &BlockSchema, count: usize) {
    if let Err(message) = block.check_items(count) {
        errors.push(FieldError::new(join(path, block.name), message));
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}
