use serde::{Deserialize, Serialize};

use crate::domain::Bucket;

/// Discord webhook URL per bucket. Blank values count as unconfigured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub priority: Option<String>,
    pub camera: Option<String>,
    pub general: Option<String>,
}

impl WebhookConfig {
    pub fn env_var(bucket: Bucket) -> &'static str {
        match bucket {
            Bucket::Priority => "DISCORD_WEBHOOK_PRIORITY",
            Bucket::Camera => "DISCORD_WEBHOOK_CAMERA",
            Bucket::General => "DISCORD_WEBHOOK_GENERAL",
        }
    }

    /// Overlay non-blank `DISCORD_WEBHOOK_*` variables.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for bucket in Bucket::ALL {
            if let Some(value) = lookup(Self::env_var(bucket)) {
                let value = value.trim();
                if !value.is_empty() {
                    *self.slot_mut(bucket) = Some(value.to_string());
                }
            }
        }
    }

    pub fn get(&self, bucket: Bucket) -> Option<&str> {
        let value = match bucket {
            Bucket::Priority => &self.priority,
            Bucket::Camera => &self.camera,
            Bucket::General => &self.general,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    fn slot_mut(&mut self, bucket: Bucket) -> &mut Option<String> {
        match bucket {
            Bucket::Priority => &mut self.priority,
            Bucket::Camera => &mut self.camera,
            Bucket::General => &mut self.general,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut webhooks = WebhookConfig {
            camera: Some("https://file/camera".into()),
            general: Some("https://file/general".into()),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([
            ("DISCORD_WEBHOOK_CAMERA", "https://env/camera"),
            ("DISCORD_WEBHOOK_GENERAL", "   "),
        ]);

        webhooks.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(webhooks.get(Bucket::Camera), Some("https://env/camera"));
        // blank env value leaves the file value alone
        assert_eq!(webhooks.get(Bucket::General), Some("https://file/general"));
        assert_eq!(webhooks.get(Bucket::Priority), None);
    }

    #[test]
    fn test_blank_value_is_unconfigured() {
        let webhooks = WebhookConfig {
            priority: Some("".into()),
            ..Default::default()
        };
        assert_eq!(webhooks.get(Bucket::Priority), None);
    }
}
