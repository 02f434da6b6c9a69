//! AWS SDK client setup (Imperative Shell).

use aws_sdk_dynamodb::Client;

use crate::config::Config;

/// Creates a DynamoDB client from explicit configuration.
///
/// The region and endpoint come from `config`. Credentials come from the SDK
/// default chain, which is resolved lazily: missing credentials only show up
/// on the first request and are classified as `StoreError::Config` by
/// [`super::error::map_sdk_error`].
pub async fn create_client(config: &Config) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    Client::new(&sdk_config_loader.load().await)
}
