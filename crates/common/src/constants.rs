//! Amazon Lex model building constraints
//!
//! Data models are documented at
//! <https://docs.aws.amazon.com/lex/latest/dg/API_Types_Amazon_Lex_Model_Building_Service.html>

// General

pub const NAME_MIN_LENGTH: usize = 1;
pub const NAME_MAX_LENGTH: usize = 100;
pub const NAME_PATTERN: &str = r"^([A-Za-z]_?)+$";

pub const VERSION_MIN_LENGTH: usize = 1;
pub const VERSION_MAX_LENGTH: usize = 64;
pub const VERSION_PATTERN: &str = r"^(\$LATEST|[0-9]+)$";
pub const VERSION_LATEST: &str = "$LATEST";

pub const DESCRIPTION_MIN_LENGTH: usize = 0;
pub const DESCRIPTION_MAX_LENGTH: usize = 200;

// Bot

pub const BOT_NAME_MIN_LENGTH: usize = 2;
pub const BOT_NAME_MAX_LENGTH: usize = 50;
pub const BOT_IDLE_SESSION_TTL_MIN: i64 = 60;
pub const BOT_IDLE_SESSION_TTL_MAX: i64 = 86400;
pub const BOT_IDLE_SESSION_TTL_DEFAULT: i64 = 300;
pub const BOT_MIN_INTENTS: usize = 1;
pub const BOT_MAX_INTENTS: usize = 100;

// Message

pub const MESSAGE_CONTENT_MIN_LENGTH: usize = 1;
pub const MESSAGE_CONTENT_MAX_LENGTH: usize = 1000;
pub const MESSAGE_GROUP_NUMBER_MIN: i64 = 1;
pub const MESSAGE_GROUP_NUMBER_MAX: i64 = 5;

// Statement

pub const RESPONSE_CARD_MIN_LENGTH: usize = 1;
pub const RESPONSE_CARD_MAX_LENGTH: usize = 50000;
pub const STATEMENT_MESSAGES_MIN: usize = 1;
pub const STATEMENT_MESSAGES_MAX: usize = 15;

// Prompt

pub const PROMPT_MAX_ATTEMPTS_MIN: i64 = 1;
pub const PROMPT_MAX_ATTEMPTS_MAX: i64 = 5;

// Timeouts

pub const DEFAULT_UPDATE_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_DELETE_TIMEOUT_SECS: u64 = 5 * 60;
pub const DEFAULT_RETRY_INITIAL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_RETRY_MAX_INTERVAL_MS: u64 = 10_000;
