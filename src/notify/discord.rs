use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::app::Result;
use crate::domain::Notification;
use crate::notify::Notifier;
use crate::router::Destination;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Clone)]
pub struct DiscordNotifier {
    client: Client,
    timeout: Duration,
}

impl DiscordNotifier {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for DiscordNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn deliver(&self, destination: &Destination, notification: &Notification) -> Result<()> {
        let payload = DiscordWebhookPayload::from_notification(notification);

        let response = self
            .client
            .post(destination.url())
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?;
        response.error_for_status_ref()?;

        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: &'static str,
    value: String,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct EmbedFooter {
    text: String,
}

#[derive(Debug, Serialize)]
struct DiscordEmbed {
    title: String,
    url: String,
    description: String,
    fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<EmbedFooter>,
}

#[derive(Debug, Serialize)]
struct DiscordWebhookPayload {
    embeds: Vec<DiscordEmbed>,
}

impl DiscordWebhookPayload {
    fn from_notification(notification: &Notification) -> Self {
        let mut fields = Vec::new();
        if let Some(price) = &notification.price {
            fields.push(EmbedField {
                name: "Price (best effort)",
                value: price.clone(),
                inline: true,
            });
        }
        fields.push(EmbedField {
            name: "Type (best effort)",
            value: notification.listing_type.to_string(),
            inline: true,
        });

        Self {
            embeds: vec![DiscordEmbed {
                title: notification.title.clone(),
                url: notification.link.clone(),
                description: notification.description.clone(),
                fields,
                footer: notification
                    .footer
                    .as_ref()
                    .map(|text| EmbedFooter { text: text.clone() }),
            }],
        }
    }
}
