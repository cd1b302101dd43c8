// [libs/domain/notification/src/slack.rs]
use async_trait::async_trait;
use serde_json::json;

use crate::{NotificationError, Notifier, SystemNotification};

/// Publishes notifications to a Slack incoming webhook. Mirrors the
/// source's `send_slack_message`: when a mention user id is configured, it
/// is prepended to the message body as `<@user_id>`.
pub struct SlackNotifier {
    webhook_url: String,
    mention_user_id: Option<String>,
    http: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(webhook_url: impl Into<String>, mention_user_id: Option<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            mention_user_id,
            http: reqwest::Client::new(),
        }
    }

    fn format_message(&self, notification: &SystemNotification) -> String {
        match &self.mention_user_id {
            Some(user_id) => format!("<@{user_id}> {}", notification.message),
            None => notification.message.clone(),
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, notification: &SystemNotification) -> Result<(), NotificationError> {
        let text = self.format_message(notification);
        self.http
            .post(&self.webhook_url)
            .json(&json!({ "text": text }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotificationSeverity;

    #[test]
    fn mention_is_prepended_when_configured() {
        let notifier = SlackNotifier::new("https://hooks.example/x", Some("U123".to_string()));
        let notification = SystemNotification::new(NotificationSeverity::Warning, "rate limited");
        assert_eq!(
            notifier.format_message(&notification),
            "<@U123> rate limited"
        );
    }

    #[test]
    fn message_is_unchanged_without_a_configured_mention() {
        let notifier = SlackNotifier::new("https://hooks.example/x", None);
        let notification = SystemNotification::new(NotificationSeverity::Info, "all clear");
        assert_eq!(notifier.format_message(&notification), "all clear");
    }
}
