//! Immutable schema descriptors for the Lex resources
//!
//! Each descriptor is a `'static` value built at compile time and shared by
//! reference. Validation walks the flat records against these descriptors and
//! the CLI prints them as JSON.

use lex_provider_common::api::{ContentType, Locale, ProcessBehavior};
use lex_provider_common::constants::*;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("name pattern is a valid regex"));

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VERSION_PATTERN).expect("version pattern is a valid regex"));

/// Scalar attribute type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Integer,
    Boolean,
}

/// How a nested block is represented in flat configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NestingMode {
    /// Exactly one nested object, stored as a one-element list
    Single,
    /// Unordered collection of nested objects
    Set,
}

/// Value used when the attribute is not configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    String(&'static str),
    Integer(i64),
    Boolean(bool),
}

/// Constraint checked before any remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Validation {
    StringLength { min: usize, max: usize },
    IntRange { min: i64, max: i64 },
    OneOf { values: &'static [&'static str] },
    /// Lex name: letters with optional single underscores between them
    Name { min: usize, max: usize },
    /// `$LATEST` or a numeric version
    Version,
}

impl Validation {
    /// Check a string value, returning a human readable reason on failure
    pub fn check_str(&self, value: &str) -> Result<(), String> {
        let len = value.chars().count();
        match *self {
            Validation::StringLength { min, max } => check_length(len, min, max),
            Validation::OneOf { values } => {
                if values.contains(&value) {
                    Ok(())
                } else {
                    Err(format!("expected one of {:?}, got {:?}", values, value))
                }
            }
            Validation::Name { min, max } => {
                check_length(len, min, max)?;
                if NAME_REGEX.is_match(value) {
                    Ok(())
                } else {
                    Err(format!("{:?} does not match {}", value, NAME_PATTERN))
                }
            }
            Validation::Version => {
                check_length(len, VERSION_MIN_LENGTH, VERSION_MAX_LENGTH)?;
                if VERSION_REGEX.is_match(value) {
                    Ok(())
                } else {
                    Err(format!("{:?} does not match {}", value, VERSION_PATTERN))
                }
            }
            Validation::IntRange { .. } => Err("expected an integer".to_string()),
        }
    }

    /// Check an integer value
    pub fn check_int(&self, value: i64) -> Result<(), String> {
        match *self {
            Validation::IntRange { min, max } => {
                if (min..=max).contains(&value) {
                    Ok(())
                } else {
                    Err(format!(
                        "expected to be in the range ({} - {}), got {}",
                        min, max, value
                    ))
                }
            }
            _ => Err("expected a string".to_string()),
        }
    }
}

fn check_length(len: usize, min: usize, max: usize) -> Result<(), String> {
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(format!(
            "expected length to be in the range ({} - {}), got {}",
            min, max, len
        ))
    }
}

/// A scalar attribute of a resource or nested block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub required: bool,
    pub computed: bool,
    /// Changing this attribute replaces the resource
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Validation>,
}

impl AttributeSchema {
    pub const fn required(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            computed: false,
            force_new: false,
            default: None,
            validation: None,
        }
    }

    pub const fn optional(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    /// Read-only attribute assigned by the remote service
    pub const fn computed(name: &'static str) -> Self {
        Self {
            required: false,
            computed: true,
            ..Self::required(name, AttributeKind::String)
        }
    }

    pub const fn force_new(self) -> Self {
        Self {
            force_new: true,
            ..self
        }
    }

    pub const fn or_computed(self) -> Self {
        Self {
            computed: true,
            ..self
        }
    }

    pub const fn with_default(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn with_validation(self, validation: Validation) -> Self {
        Self {
            validation: Some(validation),
            ..self
        }
    }

    /// Validate a string value against this attribute's constraint
    pub fn validate_str(&self, value: &str) -> Result<(), String> {
        match &self.validation {
            Some(validation) => validation.check_str(value),
            None => Ok(()),
        }
    }

    /// Validate an integer value against this attribute's constraint
    pub fn validate_int(&self, value: i64) -> Result<(), String> {
        match &self.validation {
            Some(validation) => validation.check_int(value),
            None => Ok(()),
        }
    }
}

/// A nested block and its cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockSchema {
    pub name: &'static str,
    pub nesting: NestingMode,
    pub min_items: usize,
    pub max_items: usize,
    pub attributes: &'static [AttributeSchema],
    pub blocks: &'static [BlockSchema],
}

impl BlockSchema {
    /// Check the number of configured items against the block's bounds
    pub fn check_items(&self, count: usize) -> Result<(), String> {
        if (self.min_items..=self.max_items).contains(&count) {
            Ok(())
        } else if self.min_items == self.max_items {
            Err(format!(
                "expected exactly {} item(s), got {}",
                self.min_items, count
            ))
        } else {
            Err(format!(
                "expected between {} and {} items, got {}",
                self.min_items, self.max_items, count
            ))
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn block(&self, name: &str) -> Option<&BlockSchema> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

/// Top-level resource schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    pub name: &'static str,
    pub attributes: &'static [AttributeSchema],
    pub blocks: &'static [BlockSchema],
    pub update_timeout_secs: u64,
    pub delete_timeout_secs: u64,
}

impl ResourceSchema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn block(&self, name: &str) -> Option<&BlockSchema> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

// Message

pub const MESSAGE_CONTENT: AttributeSchema =
    AttributeSchema::required("content", AttributeKind::String).with_validation(
        Validation::StringLength {
            min: MESSAGE_CONTENT_MIN_LENGTH,
            max: MESSAGE_CONTENT_MAX_LENGTH,
        },
    );

pub const MESSAGE_CONTENT_TYPE: AttributeSchema =
    AttributeSchema::required("content_type", AttributeKind::String).with_validation(
        Validation::OneOf {
            values: &ContentType::ALL,
        },
    );

pub const MESSAGE_GROUP_NUMBER: AttributeSchema =
    AttributeSchema::optional("group_number", AttributeKind::Integer).with_validation(
        Validation::IntRange {
            min: MESSAGE_GROUP_NUMBER_MIN,
            max: MESSAGE_GROUP_NUMBER_MAX,
        },
    );

pub const MESSAGE: BlockSchema = BlockSchema {
    name: "message",
    nesting: NestingMode::Set,
    min_items: STATEMENT_MESSAGES_MIN,
    max_items: STATEMENT_MESSAGES_MAX,
    attributes: &[MESSAGE_CONTENT, MESSAGE_CONTENT_TYPE, MESSAGE_GROUP_NUMBER],
    blocks: &[],
};

// Statement and prompt

pub const RESPONSE_CARD: AttributeSchema =
    AttributeSchema::optional("response_card", AttributeKind::String).with_validation(
        Validation::StringLength {
            min: RESPONSE_CARD_MIN_LENGTH,
            max: RESPONSE_CARD_MAX_LENGTH,
        },
    );

pub const PROMPT_MAX_ATTEMPTS: AttributeSchema =
    AttributeSchema::required("max_attempts", AttributeKind::Integer).with_validation(
        Validation::IntRange {
            min: PROMPT_MAX_ATTEMPTS_MIN,
            max: PROMPT_MAX_ATTEMPTS_MAX,
        },
    );

pub const ABORT_STATEMENT: BlockSchema = BlockSchema {
    name: "abort_statement",
    nesting: NestingMode::Single,
    min_items: 1,
    max_items: 1,
    attributes: &[RESPONSE_CARD],
    blocks: &[MESSAGE],
};

pub const CLARIFICATION_PROMPT: BlockSchema = BlockSchema {
    name: "clarification_prompt",
    nesting: NestingMode::Single,
    min_items: 1,
    max_items: 1,
    attributes: &[PROMPT_MAX_ATTEMPTS, RESPONSE_CARD],
    blocks: &[MESSAGE],
};

// Intent

pub const INTENT_NAME: AttributeSchema = AttributeSchema::required(
    "intent_name",
    AttributeKind::String,
)
.with_validation(Validation::Name {
    min: NAME_MIN_LENGTH,
    max: NAME_MAX_LENGTH,
});

pub const INTENT_VERSION: AttributeSchema =
    AttributeSchema::required("intent_version", AttributeKind::String)
        .with_validation(Validation::Version);

pub const INTENT: BlockSchema = BlockSchema {
    name: "intent",
    nesting: NestingMode::Set,
    min_items: BOT_MIN_INTENTS,
    max_items: BOT_MAX_INTENTS,
    attributes: &[INTENT_NAME, INTENT_VERSION],
    blocks: &[],
};

// Shared

pub const DESCRIPTION: AttributeSchema =
    AttributeSchema::optional("description", AttributeKind::String)
        .with_default(DefaultValue::String(""))
        .with_validation(Validation::StringLength {
            min: DESCRIPTION_MIN_LENGTH,
            max: DESCRIPTION_MAX_LENGTH,
        });

pub const CHECKSUM: AttributeSchema = AttributeSchema::computed("checksum");

// Bot

pub const BOT_NAME: AttributeSchema = AttributeSchema::required("name", AttributeKind::String)
    .force_new()
    .with_validation(Validation::Name {
        min: BOT_NAME_MIN_LENGTH,
        max: BOT_NAME_MAX_LENGTH,
    });

pub const BOT_IDLE_SESSION_TTL: AttributeSchema =
    AttributeSchema::optional("idle_session_ttl_in_seconds", AttributeKind::Integer)
        .with_default(DefaultValue::Integer(BOT_IDLE_SESSION_TTL_DEFAULT))
        .with_validation(Validation::IntRange {
            min: BOT_IDLE_SESSION_TTL_MIN,
            max: BOT_IDLE_SESSION_TTL_MAX,
        });

pub const BOT_VERSION: AttributeSchema =
    AttributeSchema::optional("version", AttributeKind::String)
        .with_default(DefaultValue::String(VERSION_LATEST))
        .with_validation(Validation::Version);

pub static BOT: ResourceSchema = ResourceSchema {
    name: "aws_lex_bot",
    attributes: &[
        CHECKSUM,
        AttributeSchema::required("child_directed", AttributeKind::Boolean),
        DESCRIPTION,
        AttributeSchema::computed("failure_reason"),
        BOT_IDLE_SESSION_TTL,
        AttributeSchema::optional("locale", AttributeKind::String)
            .force_new()
            .with_default(DefaultValue::String("en-US"))
            .with_validation(Validation::OneOf {
                values: &Locale::ALL,
            }),
        BOT_NAME,
        AttributeSchema::optional("process_behavior", AttributeKind::String)
            .with_default(DefaultValue::String("SAVE"))
            .with_validation(Validation::OneOf {
                values: &ProcessBehavior::ALL,
            }),
        AttributeSchema::computed("status"),
        BOT_VERSION,
        AttributeSchema::optional("voice_id", AttributeKind::String).or_computed(),
    ],
    blocks: &[ABORT_STATEMENT, CLARIFICATION_PROMPT, INTENT],
    update_timeout_secs: DEFAULT_UPDATE_TIMEOUT_SECS,
    delete_timeout_secs: DEFAULT_DELETE_TIMEOUT_SECS,
};

// Bot alias

pub const ALIAS_BOT_NAME: AttributeSchema = AttributeSchema {
    name: "bot_name",
    ..BOT_NAME
};

pub const ALIAS_BOT_VERSION: AttributeSchema =
    AttributeSchema::required("bot_version", AttributeKind::String)
        .with_validation(Validation::Version);

pub const ALIAS_NAME: AttributeSchema = AttributeSchema::required("name", AttributeKind::String)
    .force_new()
    .with_validation(Validation::Name {
        min: NAME_MIN_LENGTH,
        max: NAME_MAX_LENGTH,
    });

pub static BOT_ALIAS: ResourceSchema = ResourceSchema {
    name: "aws_lex_bot_alias",
    attributes: &[
        ALIAS_BOT_NAME,
        ALIAS_BOT_VERSION,
        CHECKSUM,
        DESCRIPTION,
        ALIAS_NAME,
    ],
    blocks: &[],
    update_timeout_secs: DEFAULT_UPDATE_TIMEOUT_SECS,
    delete_timeout_secs: DEFAULT_DELETE_TIMEOUT_SECS,
};
