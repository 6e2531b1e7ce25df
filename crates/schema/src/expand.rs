//! Expand pipeline: flat configuration blocks into remote request objects

use crate::blocks::{IntentBlock, MessageBlock, PromptBlock, StatementBlock};
use crate::resource_data::{BotAliasData, BotData};
use lex_provider_common::api::{
    Intent, Message, Prompt, PutBotAliasInput, PutBotInput, Statement,
};
use std::collections::BTreeSet;

/// Expand a set of message blocks
///
/// A `group_number` of zero is dropped, the same as an absent one.
pub fn expand_messages(blocks: &BTreeSet<MessageBlock>) -> Vec<Message> {
    blocks
        .iter()
        .map(|block| Message {
            content: block.content.clone(),
            content_type: block.content_type,
            group_number: block.group_number.filter(|&n| n != 0),
        })
        .collect()
}

pub fn expand_statement(block: &StatementBlock) -> Statement {
    Statement {
        messages: expand_messages(&block.message),
        response_card: non_empty(block.response_card.as_deref()),
    }
}

pub fn expand_prompt(block: &PromptBlock) -> Prompt {
    Prompt {
        max_attempts: block.max_attempts,
        messages: expand_messages(&block.message),
        response_card: non_empty(block.response_card.as_deref()),
    }
}

pub fn expand_intents(blocks: &BTreeSet<IntentBlock>) -> Vec<Intent> {
    blocks
        .iter()
        .map(|block| Intent {
            intent_name: block.intent_name.clone(),
            intent_version: block.intent_version.clone(),
        })
        .collect()
}

/// Build the put request for a bot
///
/// The checksum is attached only when the record carries one, which is the
/// case after the first read.
pub fn expand_bot(data: &BotData) -> PutBotInput {
    PutBotInput {
        name: data.id.clone().unwrap_or_else(|| data.name.clone()),
        description: non_empty(Some(data.description.as_str())),
        intents: expand_intents(&data.intent),
        clarification_prompt: expand_prompt(data.clarification_prompt.get()),
        abort_statement: expand_statement(data.abort_statement.get()),
        idle_session_ttl_in_seconds: data.idle_session_ttl_in_seconds,
        voice_id: non_empty(data.voice_id.as_deref()),
        checksum: non_empty(data.checksum.as_deref()),
        process_behavior: data.process_behavior,
        locale: data.locale,
        child_directed: data.child_directed,
    }
}

pub fn expand_bot_alias(data: &BotAliasData) -> PutBotAliasInput {
    PutBotAliasInput {
        name: data.id.clone().unwrap_or_else(|| data.name.clone()),
        bot_name: data.bot_name.clone(),
        bot_version: data.bot_version.clone(),
        description: non_empty(Some(data.description.as_str())),
        checksum: non_empty(data.checksum.as_deref()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lex_provider_common::api::{ContentType, ProcessBehavior};

    fn messages() -> BTreeSet<MessageBlock> {
        [
            MessageBlock::new("Sorry, I am not able to assist", ContentType::PlainText),
            MessageBlock::new("<speak>Goodbye</speak>", ContentType::Ssml).with_group(2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_expand_messages_drops_zero_group() {
        let blocks: BTreeSet<_> = [MessageBlock::new("Hi", ContentType::PlainText).with_group(0)]
            .into_iter()
            .collect();

        let expanded = expand_messages(&blocks);
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].group_number, None);
    }

    #[test]
    fn test_expand_statement_omits_empty_response_card() {
        let block = StatementBlock {
            message: messages(),
            response_card: Some(String::new()),
        };

        let statement = expand_statement(&block);
        assert_eq!(statement.messages.len(), 2);
        assert_eq!(statement.response_card, None);
    }

    #[test]
    fn test_expand_prompt() {
        let block = PromptBlock {
            max_attempts: 3,
            message: messages(),
            response_card: Some("{\"version\": 1}".to_string()),
        };

        let prompt = expand_prompt(&block);
        assert_eq!(prompt.max_attempts, 3);
        assert_eq!(prompt.response_card.as_deref(), Some("{\"version\": 1}"));
        assert!(prompt
            .messages
            .iter()
            .any(|m| m.content_type == ContentType::Ssml && m.group_number == Some(2)));
    }

    #[test]
    fn test_expand_bot_optional_fields() {
        let mut bot = BotData::new(
            "OrderFlowers",
            StatementBlock {
                message: messages(),
                response_card: None,
            },
            PromptBlock {
                max_attempts: 2,
                message: messages(),
                response_card: None,
            },
            [IntentBlock::new("OrderFlowers", "1")].into_iter().collect(),
        );

        let input = expand_bot(&bot);
        assert_eq!(input.name, "OrderFlowers");
        assert_eq!(input.description, None);
        assert_eq!(input.voice_id, None);
        assert_eq!(input.checksum, None);
        assert_eq!(input.process_behavior, ProcessBehavior::Save);
        assert_eq!(input.intents[0].intent_version, "1");

        bot.description = "Orders flowers".to_string();
        bot.voice_id = Some("Salli".to_string());
        bot.checksum = Some("abc123".to_string());
        let input = expand_bot(&bot);
        assert_eq!(input.description.as_deref(), Some("Orders flowers"));
        assert_eq!(input.voice_id.as_deref(), Some("Salli"));
        assert_eq!(input.checksum.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_expand_bot_alias_uses_identity() {
        let mut alias = BotAliasData::new("OrderFlowers", "$LATEST", "OrderFlowersProd");
        alias.id = Some("OrderFlowersProd".to_string());
        alias.checksum = Some("xyz".to_string());

        let input = expand_bot_alias(&alias);
        assert_eq!(input.name, "OrderFlowersProd");
        assert_eq!(input.bot_name, "OrderFlowers");
        assert_eq!(input.description, None);
        assert_eq!(input.checksum.as_deref(), Some("xyz"));
    }
}
