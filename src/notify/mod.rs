pub mod discord;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Notification;
use crate::router::Destination;

pub use discord::DiscordNotifier;

#[async_trait]
pub trait Notifier {
    /// Single attempt, no retries.
    async fn deliver(&self, destination: &Destination, notification: &Notification) -> Result<()>;
}
