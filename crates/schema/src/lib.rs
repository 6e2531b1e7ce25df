//! Schema and translation layer for the Lex resources
//!
//! Flat configuration can only hold single-level maps and lists, while the
//! model building service speaks in nested objects. This crate converts
//! between the two:
//!
//! - **Expand**: flat blocks → nested request objects ([`expand`])
//! - **Flatten**: nested response objects → flat blocks ([`flatten`])
//!
//! ## Nesting conventions
//!
//! - A nested object that must appear exactly once (`abort_statement`,
//!   `clarification_prompt`) is stored as a one-element list, modelled by
//!   [`ExactlyOne`].
//! - An unordered collection (`message`, `intent`) is stored as a set.
//!
//! Both pipelines are pure. Records are checked against the immutable
//! [`descriptors`] by [`validate_bot`] and [`validate_bot_alias`] before
//! anything is sent.

mod blocks;
pub mod descriptors;
pub mod expand;
pub mod flatten;
mod resource_data;
mod validation;

pub use blocks::{
    unwrap_single, wrap_single, ExactlyOne, IntentBlock, MessageBlock, PromptBlock,
    StatementBlock,
};
pub use descriptors::{BlockSchema, NestingMode, ResourceSchema};
pub use expand::{expand_bot, expand_bot_alias};
pub use flatten::{flatten_bot, flatten_bot_alias};
pub use resource_data::{BotAliasData, BotData};
pub use validation::{validate_bot, validate_bot_alias};
