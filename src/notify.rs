use async_trait::async_trait;
use std::env;
use tracing::info;

use crate::constants::*;
use crate::error::{ConfigurationError, PublishError};

/// A channel that broadcasts a rendered report.
#[async_trait(?Send)]
pub trait Notifier {
    async fn publish(&self, text: &str) -> Result<(), PublishError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioCredentials {
    pub sid: String,
    pub token: String,
    pub from: String,
    pub to: String,
}

impl TwilioCredentials {
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigurationError::MissingCredential(key))
        };
        Ok(TwilioCredentials {
            sid: get(SID_VAR)?,
            token: get(TOKEN_VAR)?,
            from: get(FROM_VAR)?,
            to: get(TO_VAR)?,
        })
    }
}

/// Sends reports as SMS.
pub struct TwilioNotifier {
    client: twilio::Client,
    from: String,
    to: String,
}

impl TwilioNotifier {
    pub fn new(credentials: TwilioCredentials) -> Self {
        TwilioNotifier {
            client: twilio::Client::new(&credentials.sid, &credentials.token),
            from: credentials.from,
            to: credentials.to,
        }
    }
}

#[async_trait(?Send)]
impl Notifier for TwilioNotifier {
    async fn publish(&self, text: &str) -> Result<(), PublishError> {
        self.client
            .send_message(twilio::OutboundMessage::new(&self.from, &self.to, text))
            .await
            .map_err(|e| PublishError::Transport(format!("{:?}", e)))?;
        info!(to = %self.to, "report published");
        Ok(())
    }
}

/// Prints instead of sending; stands in for the real channel in test mode.
pub struct ConsoleNotifier;

#[async_trait(?Send)]
impl Notifier for ConsoleNotifier {
    async fn publish(&self, text: &str) -> Result<(), PublishError> {
        println!("[publish] {}", text.trim_end());
        Ok(())
    }
}
