//! Bot alias resource
//!
//! Same create/read/update shape as the bot, keyed by `(bot_name, name)`.
//! Delete additionally waits until the alias reads as not found, so that a
//! bot delete issued right after does not trip over the alias.

use crate::client::LexModelClient;
use crate::retry::{retry, retry_on_conflict, Attempt, RetryPolicy, Timeouts};
use lex_provider_common::api::{DeleteBotAliasInput, GetBotAliasInput};
use lex_provider_common::{
    Operation, ProviderConfig, ProviderError, ResourceKind, Result, RetryConfig, ServiceError,
};
use lex_provider_schema::{expand_bot_alias, flatten_bot_alias, validate_bot_alias, BotAliasData};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Separator between bot name and alias name in an import identifier
pub const IMPORT_ID_SEPARATOR: char = '.';

/// Manages the lifecycle of a bot alias
pub struct BotAliasResource<C> {
    client: C,
    timeouts: Timeouts,
    pacing: RetryConfig,
}

impl<C: LexModelClient> BotAliasResource<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            timeouts: Timeouts::default(),
            pacing: RetryConfig::default(),
        }
    }

    pub fn with_config(client: C, config: &ProviderConfig) -> Self {
        Self {
            client,
            timeouts: config.timeouts_for(ResourceKind::BotAlias).into(),
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

    pub fn create(&self, data: &mut BotAliasData) -> Result<()> {
        validate_bot_alias(data)?;

        let mut input = expand_bot_alias(data);
        input.name = data.name.clone();
        input.checksum = None;

        info!(bot = %data.bot_name, alias = %data.name, "creating bot alias");
        self.client
            .put_bot_alias(&input)
            .map_err(|source| ProviderError::Service {
                operation: Operation::Create,
                kind: ResourceKind::BotAlias,
                id: data.name.clone(),
                source,
            })?;

        data.id = Some(data.name.clone());
        self.read(data)
    }

    /// Refresh the record; an alias that no longer exists clears the identity
    pub fn read(&self, data: &mut BotAliasData) -> Result<()> {
        let Some(id) = data.id.clone() else {
            debug!(alias = %data.name, "bot alias has no identity, nothing to read");
            return Ok(());
        };

        let resp = match self.client.get_bot_alias(&GetBotAliasInput {
            name: id.clone(),
            bot_name: data.bot_name.clone(),
        }) {
            Ok(resp) => resp,
            Err(err) if err.is_not_found() => {
                warn!(alias = %id, "bot alias not found, removing from state");
                data.id = None;
                return Ok(());
            }
            Err(source) => {
                return Err(ProviderError::Service {
                    operation: Operation::Read,
                    kind: ResourceKind::BotAlias,
                    id,
                    source,
                })
            }
        };

        *data = flatten_bot_alias(resp);
        data.id = Some(id);
        Ok(())
    }

    pub fn update(&self, data: &mut BotAliasData) -> Result<()> {
        validate_bot_alias(data)?;

        let id = data.id.clone().unwrap_or_else(|| data.name.clone());
        let mut input = expand_bot_alias(data);
        input.name = id.clone();

        info!(bot = %data.bot_name, alias = %id, "updating bot alias");
        let policy = RetryPolicy::new(self.timeouts.update, &self.pacing);
        retry_on_conflict(&policy, "bot alias", || self.client.put_bot_alias(&input)).map_err(
            |err| err.into_provider_error(Operation::Update, ResourceKind::BotAlias, &id),
        )?;

        data.id = Some(id);
        self.read(data)
    }

    /// Delete the alias and wait until the service no longer returns it
    ///
    /// Both the delete call and the wait are bounded by the delete timeout.
    pub fn delete(&self, data: &mut BotAliasData) -> Result<()> {
        let id = data.id.clone().unwrap_or_else(|| data.name.clone());
        let key = GetBotAliasInput {
            name: data.name.clone(),
            bot_name: data.bot_name.clone(),
        };
        let policy = RetryPolicy::new(self.timeouts.delete, &self.pacing);

        info!(bot = %key.bot_name, alias = %key.name, "deleting bot alias");
        let input = DeleteBotAliasInput {
            name: key.name.clone(),
            bot_name: key.bot_name.clone(),
        };
        retry_on_conflict(&policy, "bot alias", || self.client.delete_bot_alias(&input)).map_err(
            |err| err.into_provider_error(Operation::Delete, ResourceKind::BotAlias, &id),
        )?;

        retry(&policy, |attempt| match self.client.get_bot_alias(&key) {
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(Attempt::Fail(err)),
            Ok(_) => {
                debug!(alias = %key.name, attempt, "bot alias still present");
                Err(Attempt::Retry(ServiceError::Conflict(format!(
                    "{:?}: bot alias still deleting",
                    id
                ))))
            }
        })
        .map_err(|err| err.into_provider_error(Operation::Delete, ResourceKind::BotAlias, &id))?;

        data.id = None;
        Ok(())
    }

    /// Seed a record from a `BOT_NAME.BOT_ALIAS_NAME` identifier
    ///
    /// No remote call is made; the following read fills in the rest.
    pub fn import(id: &str) -> Result<BotAliasData> {
        parse_import_id(id)
    }
}

/// Split a `BOT_NAME.BOT_ALIAS_NAME` import identifier into a record
pub fn parse_import_id(id: &str) -> Result<BotAliasData> {
    let parts: Vec<&str> = id.split(IMPORT_ID_SEPARATOR).collect();
    match parts.as_slice() {
        [bot_name, name] if !bot_name.is_empty() && !name.is_empty() => Ok(BotAliasData {
            id: Some(name.to_string()),
            bot_name: bot_name.to_string(),
            name: name.to_string(),
            ..Default::default()
        }),
        _ => Err(ProviderError::Import(id.to_string())),
    }
}
