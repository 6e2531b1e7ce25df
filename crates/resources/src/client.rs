//! Remote model building service interface
//!
//! The resources only depend on this trait; the HTTP client that implements
//! it lives outside this crate.

use lex_provider_common::api::{
    DeleteBotAliasInput, DeleteBotInput, GetBotAliasInput, GetBotAliasOutput, GetBotInput,
    GetBotOutput, PutBotAliasInput, PutBotAliasOutput, PutBotInput, PutBotOutput,
};
use lex_provider_common::ServiceError;

/// Bot and bot alias operations of the model building service
///
/// Implementations classify failures into [`ServiceError`] kinds so callers
/// can tell not-found and conflict apart from everything else.
#[cfg_attr(test, mockall::automock)]
pub trait LexModelClient {
    fn put_bot(&self, input: &PutBotInput) -> Result<PutBotOutput, ServiceError>;

    fn get_bot(&self, input: &GetBotInput) -> Result<GetBotOutput, ServiceError>;

    fn delete_bot(&self, input: &DeleteBotInput) -> Result<(), ServiceError>;

    fn put_bot_alias(&self, input: &PutBotAliasInput) -> Result<PutBotAliasOutput, ServiceError>;

    fn get_bot_alias(&self, input: &GetBotAliasInput) -> Result<GetBotAliasOutput, ServiceError>;

    fn delete_bot_alias(&self, input: &DeleteBotAliasInput) -> Result<(), ServiceError>;
}
