use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::{Client, Method, Request, header::AUTHORIZATION};
use tokio::time::Instant;
use tracing::debug;

use crate::{
    domain::RequestConfig,
    error::{AppResult, HttpError},
};

use super::client::build_client;

/// Result of a single request attempt.
#[derive(Debug)]
pub enum RequestOutcome {
    Success { latency: Duration, body: Bytes },
    Failure(HttpError),
}

/// Issues one request on behalf of a worker.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, worker_id: usize) -> RequestOutcome;
}

/// Sends the configured request with a bearer token and no body.
pub struct HttpExecutor {
    client: Client,
    config: Arc<RequestConfig>,
}

impl HttpExecutor {
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: Arc<RequestConfig>) -> AppResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    fn build_request(&self) -> Result<Request, HttpError> {
        let method = Method::from_bytes(self.config.method.as_bytes()).map_err(|err| {
            HttpError::InvalidMethod {
                method: self.config.method.clone(),
                source: err,
            }
        })?;
        self.client
            .request(method, self.config.url.as_str())
            .header(AUTHORIZATION, self.config.authorization_value())
            .build()
            .map_err(|err| HttpError::BuildRequest { source: err })
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, worker_id: usize) -> RequestOutcome {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => return RequestOutcome::Failure(err),
        };

        let start = Instant::now();
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(err) => return RequestOutcome::Failure(HttpError::Send { source: err }),
        };
        let status = response.status().as_u16();

        match read_body(response).await {
            Ok(body) => {
                let latency = start.elapsed();
                debug!(
                    worker_id,
                    status,
                    latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    "Request completed"
                );
                RequestOutcome::Success { latency, body }
            }
            Err(err) => RequestOutcome::Failure(HttpError::ReadBody { source: err }),
        }
    }
}

async fn read_body(response: reqwest::Response) -> Result<Bytes, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut body = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body.freeze())
}
