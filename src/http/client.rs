use reqwest::Client;
use tracing::error;

use crate::{
    args::DEFAULT_USER_AGENT,
    domain::RequestConfig,
    error::{AppError, AppResult},
};

/// Builds the pooled client shared by every worker.
///
/// # Errors
///
/// Returns an error when the underlying TLS backend cannot be initialised.
pub fn build_client(config: &RequestConfig) -> AppResult<Client> {
    let mut client_builder = Client::builder().user_agent(DEFAULT_USER_AGENT);

    if let Some(timeout) = config.request_timeout {
        client_builder = client_builder.timeout(timeout);
    }
    if let Some(connect_timeout) = config.connect_timeout {
        client_builder = client_builder.connect_timeout(connect_timeout);
    }

    match client_builder.build() {
        Ok(client) => Ok(client),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            Err(AppError::BuildClient { source: e })
        }
    }
}
