//! DingTalk robot webhook client

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::sign::{signed_webhook_url, unix_timestamp_ms};
use crate::types::{Mention, RobotMessage, RobotResponse};
use crate::{Error, Result};

/// Public robot endpoint for DingTalk group webhooks.
pub const DEFAULT_ENDPOINT: &str = "https://oapi.dingtalk.com/robot/send";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RobotClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
    secret: String,
}

impl RobotClient {
    pub fn new(endpoint: String, access_token: String, secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            access_token,
            secret,
        }
    }

    /// Deliver one markdown message to the group.
    ///
    /// Best-effort: timeouts, connection failures, HTTP errors, and
    /// malformed response bodies are each logged with their own context and
    /// all collapse to `None`. A `Some` return means the endpoint replied
    /// with a well-formed body; check [`RobotResponse::is_ok`] for whether
    /// the message was actually accepted.
    pub async fn send_markdown(
        &self,
        title: &str,
        text: &str,
        mention: &Mention,
    ) -> Option<RobotResponse> {
        match self.try_send(title, text, mention).await {
            Ok(response) => {
                if !response.is_ok() {
                    warn!(
                        errcode = response.errcode,
                        errmsg = %response.errmsg,
                        "robot endpoint rejected the message"
                    );
                }
                Some(response)
            }
            Err(Error::Timeout) => {
                error!(endpoint = %self.endpoint, "robot request timed out");
                None
            }
            Err(Error::Connect(cause)) => {
                error!(endpoint = %self.endpoint, %cause, "robot connection failed");
                None
            }
            Err(Error::Status { status, body }) => {
                error!(%status, %body, "robot request returned an HTTP error");
                None
            }
            Err(err) => {
                error!(%err, "robot request failed");
                None
            }
        }
    }

    async fn try_send(
        &self,
        title: &str,
        text: &str,
        mention: &Mention,
    ) -> Result<RobotResponse> {
        let timestamp = unix_timestamp_ms();
        let url = signed_webhook_url(&self.endpoint, &self.access_token, &self.secret, timestamp);
        let message = RobotMessage::markdown(title.to_string(), text.to_string(), mention);

        info!("sending robot group message");
        debug!(url = %url, "robot request URL");

        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        info!(%status, body = %body, "robot response");

        if !status.is_success() {
            return Err(Error::Status { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
