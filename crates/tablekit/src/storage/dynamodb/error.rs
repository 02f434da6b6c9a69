//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `tablekit_core::store`. The
//! classification itself works on the error code and rendered message, so it
//! is tested without a client.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use tablekit_core::store::{Operation, StoreError};

/// Service error codes that mean the caller's credentials were rejected.
const AUTH_ERROR_CODES: &[&str] = &[
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "IncompleteSignatureException",
    "MissingAuthenticationTokenException",
    "ExpiredTokenException",
    "AccessDeniedException",
    "InvalidClientTokenId",
];

/// Service error codes that mean the request itself was at fault.
const REQUEST_ERROR_CODES: &[&str] = &[
    "ValidationException",
    "ResourceNotFoundException",
    "ConditionalCheckFailedException",
    "ItemCollectionSizeLimitExceededException",
    "TransactionConflictException",
    "SerializationException",
];

/// Map any operation's SDK error to a `StoreError`.
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, operation: Operation) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: Debug + Send + Sync + 'static,
{
    let detail = format!("{} failed: {}", operation, DisplayErrorContext(&err));

    match &err {
        SdkError::ServiceError(context) => classify_service_error(context.err().code(), detail),
        SdkError::ConstructionFailure(_) => {
            if mentions_credentials(&detail) {
                StoreError::Config(detail)
            } else {
                StoreError::Request(detail)
            }
        }
        SdkError::DispatchFailure(_) if mentions_credentials(&detail) => StoreError::Config(detail),
        _ => StoreError::Connection(detail),
    }
}

/// Classify a service error by its code.
///
/// Throttling, internal errors and unknown codes count as connection failures:
/// the request was well formed but the service did not complete it.
pub fn classify_service_error(code: Option<&str>, detail: String) -> StoreError {
    match code {
        Some(code) if AUTH_ERROR_CODES.contains(&code) => StoreError::Auth(detail),
        Some(code) if REQUEST_ERROR_CODES.contains(&code) => StoreError::Request(detail),
        _ => StoreError::Connection(detail),
    }
}

/// True when a rendered SDK error is about missing or unloadable credentials.
pub fn mentions_credentials(detail: &str) -> bool {
    let lower = detail.to_ascii_lowercase();
    lower.contains("credential") || lower.contains("no identity")
}
