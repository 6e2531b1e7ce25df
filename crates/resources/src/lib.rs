//! Bot and bot alias resources for the Lex provider
//!
//! Each resource drives the translation layer from `lex-provider-schema`
//! against a [`LexModelClient`]:
//!
//! - **Create**: validate, expand, put, adopt the name as identity, read back
//! - **Read**: get and flatten; not-found clears the identity
//! - **Update**: validate, expand with the last checksum, put (conflicts are
//!   retried until the update timeout), read back
//! - **Delete**: delete (conflicts are retried until the delete timeout); bot
//!   aliases additionally wait until they read as not found
//!
//! All calls are blocking and made in sequence.

mod bot;
mod bot_alias;
mod client;
pub mod retry;

pub use bot::BotResource;
pub use bot_alias::{parse_import_id, BotAliasResource, IMPORT_ID_SEPARATOR};
pub use client::LexModelClient;
pub use retry::{RetryPolicy, Timeouts};
