//! Bot resource
//!
//! Create, read, update and delete a bot through a [`LexModelClient`],
//! translating between the flat [`BotData`] record and the service's nested
//! request and response objects.

use crate::client::LexModelClient;
use crate::retry::{retry_on_conflict, RetryPolicy, Timeouts};
use lex_provider_common::api::{DeleteBotInput, GetBotInput, ProcessBehavior};
use lex_provider_common::constants::VERSION_LATEST;
use lex_provider_common::{
    Operation, ProviderConfig, ProviderError, ResourceKind, Result, RetryConfig,
};
use lex_provider_schema::{expand_bot, flatten_bot, validate_bot, BotData};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Manages the lifecycle of a bot
pub struct BotResource<C> {
    client: C,
    timeouts: Timeouts,
    pacing: RetryConfig,
}

impl<C: LexModelClient> BotResource<C> {
    /// Create a bot resource with the default timeouts
    pub fn new(client: C) -> Self {
        Self {
            client,
            timeouts: Timeouts::default(),
            pacing: RetryConfig::default(),
        }
    }

    /// Create a bot resource using the timeouts and pacing from configuration
    pub fn with_config(client: C, config: &ProviderConfig) -> Self {
        Self {
            client,
            timeouts: config.timeouts_for(ResourceKind::Bot).into(),
            pacing: config.retry,
        }
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_retry_intervals(mut self, initial: Duration, max: Duration) -> Self {
        self.pacing = RetryConfig::from_durations(initial, max);
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create the bot, adopt its name as identity, then read it back
    pub fn create(&self, data: &mut BotData) -> Result<()> {
        validate_bot(data)?;

        let mut input = expand_bot(data);
        input.name = data.name.clone();
        input.checksum = None;

        info!(bot = %data.name, "creating bot");
        self.client
            .put_bot(&input)
            .map_err(|source| ProviderError::Service {
                operation: Operation::Create,
                kind: ResourceKind::Bot,
                id: data.name.clone(),
                source,
            })?;

        data.id = Some(data.name.clone());
        self.read(data)
    }

    /// Refresh the record from the service
    ///
    /// A bot that no longer exists clears the identity instead of failing.
    /// The process behavior is carried over because the service never
    /// returns it.
    pub fn read(&self, data: &mut BotData) -> Result<()> {
        let Some(id) = data.id.clone() else {
            debug!(bot = %data.name, "bot has no identity, nothing to read");
            return Ok(());
        };

        let resp = match self.client.get_bot(&GetBotInput {
            name: id.clone(),
            version_or_alias: data.version.clone(),
        }) {
            Ok(resp) => resp,
            Err(err) if err.is_not_found() => {
                warn!(bot = %id, "bot not found, removing from state");
                data.id = None;
                return Ok(());
            }
            Err(source) => {
                return Err(ProviderError::Service {
                    operation: Operation::Read,
                    kind: ResourceKind::Bot,
                    id,
                    source,
                })
            }
        };

        let mut next = flatten_bot(resp, data.process_behavior)
            .map_err(|err| unreadable(Operation::Read, &id, err))?;
        if next.voice_id.is_none() {
            next.voice_id = data.voice_id.take();
        }
        next.id = Some(id);
        *data = next;

        debug!(bot = %data.name, status = ?data.status, "read bot");
        Ok(())
    }

    /// Put the full configuration with the last known checksum
    ///
    /// Conflicts are retried until the update timeout elapses.
    pub fn update(&self, data: &mut BotData) -> Result<()> {
        validate_bot(data)?;

        let id = data.id.clone().unwrap_or_else(|| data.name.clone());
        let mut input = expand_bot(data);
        input.name = id.clone();

        info!(bot = %id, "updating bot");
        let policy = RetryPolicy::new(self.timeouts.update, &self.pacing);
        retry_on_conflict(&policy, "bot", || self.client.put_bot(&input))
            .map_err(|err| err.into_provider_error(Operation::Update, ResourceKind::Bot, &id))?;

        data.id = Some(id);
        self.read(data)
    }

    /// Delete the bot, retrying conflicts until the delete timeout elapses
    pub fn delete(&self, data: &mut BotData) -> Result<()> {
        let id = data.id.clone().unwrap_or_else(|| data.name.clone());
        let input = DeleteBotInput { name: id.clone() };

        info!(bot = %id, "deleting bot");
        let policy = RetryPolicy::new(self.timeouts.delete, &self.pacing);
        retry_on_conflict(&policy, "bot", || self.client.delete_bot(&input))
            .map_err(|err| err.into_provider_error(Operation::Delete, ResourceKind::Bot, &id))?;

        data.id = None;
        Ok(())
    }

    /// Import an existing bot by name
    ///
    /// The `$LATEST` version is read. Returns `None` if the bot does not exist.
    pub fn import(&self, id: &str) -> Result<Option<BotData>> {
        let resp = match self.client.get_bot(&GetBotInput {
            name: id.to_string(),
            version_or_alias: VERSION_LATEST.to_string(),
        }) {
            Ok(resp) => resp,
            Err(err) if err.is_not_found() => {
                warn!(bot = %id, "bot to import not found");
                return Ok(None);
            }
            Err(source) => {
                return Err(ProviderError::Service {
                    operation: Operation::Import,
                    kind: ResourceKind::Bot,
                    id: id.to_string(),
                    source,
                })
            }
        };

        let mut data = flatten_bot(resp, ProcessBehavior::default())
            .map_err(|err| unreadable(Operation::Import, id, err))?;
        data.id = Some(id.to_string());
        Ok(Some(data))
    }
}

/// Annotate a response that could not be flattened
fn unreadable(operation: Operation, id: &str, source: ProviderError) -> ProviderError {
    ProviderError::Response {
        operation,
        kind: ResourceKind::Bot,
        id: id.to_string(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockLexModelClient;
    use lex_provider_common::api::{
        ContentType, GetBotOutput, Intent, Locale, Message, Prompt, PutBotOutput, Statement,
    };
    use lex_provider_common::ServiceError;
    use lex_provider_schema::{IntentBlock, MessageBlock, PromptBlock, StatementBlock};

    fn bot_data() -> BotData {
        let message: std::collections::BTreeSet<_> =
            [MessageBlock::new("Sorry", ContentType::PlainText)]
                .into_iter()
                .collect();

        let mut data = BotData::new(
            "OrderFlowers",
            StatementBlock {
                message: message.clone(),
                response_card: None,
            },
            PromptBlock {
                max_attempts: 2,
                message,
                response_card: None,
            },
            [IntentBlock::new("OrderFlowers", "1")].into_iter().collect(),
        );
        data.process_behavior = ProcessBehavior::Build;
        data
    }

    fn get_bot_output(checksum: &str) -> GetBotOutput {
        let message = Message {
            content: "Sorry".to_string(),
            content_type: ContentType::PlainText,
            group_number: None,
        };

        GetBotOutput {
            name: "OrderFlowers".to_string(),
            description: None,
            intents: vec![Intent {
                intent_name: "OrderFlowers".to_string(),
                intent_version: "1".to_string(),
            }],
            clarification_prompt: Some(Prompt {
                max_attempts: 2,
                messages: vec![message.clone()],
                response_card: None,
            }),
            abort_statement: Some(Statement {
                messages: vec![message],
                response_card: None,
            }),
            status: Some("READY".to_string()),
            failure_reason: None,
            idle_session_ttl_in_seconds: Some(300),
            voice_id: None,
            checksum: Some(checksum.to_string()),
            version: Some("$LATEST".to_string()),
            locale: Some(Locale::EnUs),
            child_directed: Some(false),
        }
    }

    fn conflict() -> ServiceError {
        ServiceError::Conflict("There is a conflicting operation in progress".to_string())
    }

    fn fast(
        resource: BotResource<MockLexModelClient>,
        timeout_ms: u64,
    ) -> BotResource<MockLexModelClient> {
        resource
            .with_timeouts(Timeouts {
                update: Duration::from_millis(timeout_ms),
                delete: Duration::from_millis(timeout_ms),
            })
            .with_retry_intervals(Duration::from_millis(1), Duration::from_millis(2))
    }

    #[test]
    fn test_create_sets_identity_and_reads_back() {
        let mut client = MockLexModelClient::new();
        client
            .expect_put_bot()
            .withf(|input| input.name == "OrderFlowers" && input.checksum.is_none())
            .times(1)
            .returning(|_| Ok(PutBotOutput::default()));
        client
            .expect_get_bot()
            .withf(|input| input.name == "OrderFlowers" && input.version_or_alias == "$LATEST")
            .times(1)
            .returning(|_| Ok(get_bot_output("c1")));

        let resource = BotResource::new(client);
        let mut data = bot_data();
        resource.create(&mut data).unwrap();

        assert_eq!(data.id.as_deref(), Some("OrderFlowers"));
        assert_eq!(data.checksum.as_deref(), Some("c1"));
        assert_eq!(data.status.as_deref(), Some("READY"));
        assert_eq!(data.process_behavior, ProcessBehavior::Build);
    }

    #[test]
    fn test_create_invalid_config_makes_no_calls() {
        let resource = BotResource::new(MockLexModelClient::new());
        let mut data = bot_data();
        data.name = "1nvalid".to_string();

        let err = resource.create(&mut data).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
        assert_eq!(data.id, None);
    }

    #[test]
    fn test_create_failure_is_annotated() {
        let mut client = MockLexModelClient::new();
        client.expect_put_bot().times(1).returning(|_| {
            Err(ServiceError::Other {
                code: "BadRequestException".to_string(),
                message: "intent OrderFlowers does not exist".to_string(),
            })
        });

        let resource = BotResource::new(client);
        let mut data = bot_data();
        let err = resource.create(&mut data).unwrap_err();

        assert_eq!(
            err.to_string(),
            "error creating bot OrderFlowers: BadRequestException: intent OrderFlowers does not exist"
        );
        assert_eq!(data.id, None);
    }

    #[test]
    fn test_read_not_found_clears_identity() {
        let mut client = MockLexModelClient::new();
        client
            .expect_get_bot()
            .times(1)
            .returning(|_| Err(ServiceError::NotFound("bot not found".to_string())));

        let resource = BotResource::new(client);
        let mut data = bot_data();
        data.id = Some("OrderFlowers".to_string());

        assert!(resource.read(&mut data).is_ok());
        assert_eq!(data.id, None);
    }

    #[test]
    fn test_response_without_abort_statement_is_annotated() {
        let mut client = MockLexModelClient::new();
        client.expect_get_bot().times(2).returning(|_| {
            Ok(GetBotOutput {
                abort_statement: None,
                ..get_bot_output("c1")
            })
        });

        let resource = BotResource::new(client);
        let mut data = bot_data();
        data.id = Some("OrderFlowers".to_string());

        let err = resource.read(&mut data).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Response {
                operation: Operation::Read,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "error getting bot OrderFlowers: Expected exactly one abort_statement block, found 0"
        );
        assert_eq!(data.id.as_deref(), Some("OrderFlowers"));

        let err = resource.import("OrderFlowers").unwrap_err();
        assert!(err.to_string().starts_with("error importing bot OrderFlowers: "));
    }

    #[test]
    fn test_read_other_error_surfaces() {
        let mut client = MockLexModelClient::new();
        client.expect_get_bot().times(1).returning(|_| {
            Err(ServiceError::Other {
                code: "InternalFailureException".to_string(),
                message: "oops".to_string(),
            })
        });

        let resource = BotResource::new(client);
        let mut data = bot_data();
        data.id = Some("OrderFlowers".to_string());

        let err = resource.read(&mut data).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Service {
                operation: Operation::Read,
                ..
            }
        ));
        assert_eq!(data.id.as_deref(), Some("OrderFlowers"));
    }

    #[test]
    fn test_read_keeps_configured_voice_when_not_returned() {
        let mut client = MockLexModelClient::new();
        client
            .expect_get_bot()
            .returning(|_| Ok(get_bot_output("c1")));

        let resource = BotResource::new(client);
        let mut data = bot_data();
        data.id = Some("OrderFlowers".to_string());
        data.voice_id = Some("Salli".to_string());

        resource.read(&mut data).unwrap();
        assert_eq!(data.voice_id.as_deref(), Some("Salli"));
    }

    #[test]
    fn test_update_retries_conflicts_then_succeeds() {
        let mut client = MockLexModelClient::new();
        let mut calls = 0;
        client
            .expect_put_bot()
            .withf(|input| input.checksum.as_deref() == Some("c1"))
            .times(3)
            .returning(move |_| {
                calls += 1;
                if calls < 3 {
                    Err(conflict())
                } else {
                    Ok(PutBotOutput::default())
                }
            });
        client
            .expect_get_bot()
            .times(1)
            .returning(|_| Ok(get_bot_output("c2")));

        let resource = fast(BotResource::new(client), 1000);
        let mut data = bot_data();
        data.id = Some("OrderFlowers".to_string());
        data.checksum = Some("c1".to_string());

        resource.update(&mut data).unwrap();
        assert_eq!(data.checksum.as_deref(), Some("c2"));
        assert_eq!(data.process_behavior, ProcessBehavior::Build);
    }

    #[test]
    fn test_update_times_out_while_conflicts_persist() {
        let mut client = MockLexModelClient::new();
        client.expect_put_bot().returning(|_| Err(conflict()));
        client.expect_get_bot().never();

        let resource = fast(BotResource::new(client), 20);
        let mut data = bot_data();
        data.id = Some("OrderFlowers".to_string());

        let err = resource.update(&mut data).unwrap_err();
        match &err {
            ProviderError::Timeout {
                operation,
                id,
                last,
                attempts,
                ..
            } => {
                assert_eq!(*operation, Operation::Update);
                assert_eq!(id, "OrderFlowers");
                assert!(last.is_conflict());
                assert!(*attempts > 1);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(err.to_string().contains("updating bot OrderFlowers"));
    }

    #[test]
    fn test_update_non_conflict_error_is_fatal() {
        let mut client = MockLexModelClient::new();
        client.expect_put_bot().times(1).returning(|_| {
            Err(ServiceError::Other {
                code: "PreconditionFailedException".to_string(),
                message: "checksum mismatch".to_string(),
            })
        });

        let resource = fast(BotResource::new(client), 1000);
        let mut data = bot_data();
        data.id = Some("OrderFlowers".to_string());

        let err = resource.update(&mut data).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Service {
                operation: Operation::Update,
                ..
            }
        ));
    }

    #[test]
    fn test_delete_retries_conflict() {
        let mut client = MockLexModelClient::new();
        let mut calls = 0;
        client
            .expect_delete_bot()
            .withf(|input| input.name == "OrderFlowers")
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(conflict())
                } else {
                    Ok(())
                }
            });

        let resource = fast(BotResource::new(client), 1000);
        let mut data = bot_data();
        data.id = Some("OrderFlowers".to_string());

        resource.delete(&mut data).unwrap();
        assert_eq!(data.id, None);
    }

    #[test]
    fn test_import_reads_latest() {
        let mut client = MockLexModelClient::new();
        client
            .expect_get_bot()
            .withf(|input| input.version_or_alias == "$LATEST")
            .returning(|_| Ok(get_bot_output("c1")));

        let resource = BotResource::new(client);
        let data = resource.import("OrderFlowers").unwrap().unwrap();

        assert_eq!(data.id.as_deref(), Some("OrderFlowers"));
        assert_eq!(data.process_behavior, ProcessBehavior::Save);
        assert_eq!(data.version, "$LATEST");
    }
}
