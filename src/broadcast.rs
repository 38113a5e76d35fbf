//! Delivery to the LINE Messaging API broadcast endpoint.

use std::time::Duration;

use log::{info, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio::time::sleep;
use url::Url;

use crate::config::BroadcastConfig;
use crate::error::{Error, Result};

/// Attempts per message: the first call plus two rate-limit retries.
pub const MAX_ATTEMPTS: u32 = 3;

#[derive(Serialize)]
struct BroadcastRequest<'a> {
    messages: [TextMessage<'a>; 1],
}

#[derive(Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    message_type: &'static str,
    text: &'a str,
}

/// Delivers finished messages over HTTP with bearer auth.
pub struct Broadcaster {
    client: Client,
    endpoint: Url,
    channel_token: String,
    retry_base: Duration,
    pace: Duration,
}

impl Broadcaster {
    /// Builds the HTTP client. Fails before any network use when the channel
    /// token is empty.
    pub fn new(config: &BroadcastConfig) -> Result<Self> {
        if config.channel_token.is_empty() {
            return Err(Error::MissingChannelToken);
        }
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            channel_token: config.channel_token.clone(),
            retry_base: config.retry_base,
            pace: config.pace,
        })
    }

    /// Sends one message, retrying on HTTP 429 with exponential backoff
    /// (`retry_base`, then twice that). Any other failure, whether a non-2xx
    /// status or a transport error, is fatal immediately.
    pub async fn broadcast(&self, text: &str) -> Result<()> {
        let payload = BroadcastRequest {
            messages: [TextMessage {
                message_type: "text",
                text,
            }],
        };

        let mut attempt = 0;
        loop {
            let response = self
                .client
                .post(self.endpoint.clone())
                .bearer_auth(&self.channel_token)
                .json(&payload)
                .send()
                .await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS && attempt + 1 < MAX_ATTEMPTS {
                let delay = self.retry_base * 2u32.pow(attempt);
                warn!(
                    "broadcast rate limited, retrying in {:?} (attempt {}/{})",
                    delay,
                    attempt + 1,
                    MAX_ATTEMPTS
                );
                sleep(delay).await;
                attempt += 1;
                continue;
            }

            response.error_for_status()?;
            return Ok(());
        }
    }

    /// Delivers every message in order, pausing `pace` between successive
    /// deliveries. The first fatal error abandons the remainder; messages
    /// already delivered stay delivered.
    pub async fn broadcast_all(&self, chunks: &[String]) -> Result<()> {
        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 {
                sleep(self.pace).await;
            }
            self.broadcast(chunk).await?;
            info!("delivered message {}/{}", index + 1, chunks.len());
        }
        Ok(())
    }
}
