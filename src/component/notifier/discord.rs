//! Discord 相容的 webhook 通知

use super::Notifier;
use super::notification::Notification;
use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

const FOOTER_TEXT: &str = concat!("media_organize v", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct WebhookPayload {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    color: u32,
    timestamp: String,
    footer: Footer,
}

#[derive(Debug, Serialize)]
struct Footer {
    text: String,
}

impl WebhookPayload {
    fn from_notification(notification: &Notification, timestamp: String) -> Self {
        Self {
            embeds: vec![Embed {
                title: format!("🎬 {}", notification.title),
                description: notification.body.clone(),
                color: notification.severity.color(),
                timestamp,
                footer: Footer {
                    text: FOOTER_TEXT.to_string(),
                },
            }],
        }
    }
}

/// 以 HTTP POST 送出嵌入訊息的 webhook 通知
#[derive(Debug)]
pub struct DiscordWebhook {
    endpoint: String,
    client: Client,
}

impl DiscordWebhook {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl Notifier for DiscordWebhook {
    fn notify(&self, notification: &Notification) -> Result<()> {
        let payload = WebhookPayload::from_notification(notification, Utc::now().to_rfc3339());

        self.client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .context("Failed to send webhook request")?
            .error_for_status()
            .context("Webhook returned an error status")?;

        info!("Webhook notification sent");
        Ok(())
    }
}
