//! Telegram Bot API notifier.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use rota_core::settings::NotificationTarget;
use rota_ports::error::NotifyError;
use rota_ports::outbound::Notifier;
use rota_ports::types::BotIdentity;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
}

impl TelegramNotifier {
    /// Every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, NotifyError> {
        Self::with_api_url(DEFAULT_API_URL, timeout)
    }

    pub fn with_api_url(api_url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::DeliveryFailed(e.to_string()))?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, token: &str, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, token.trim(), method)
    }

    async fn read_response<T>(response: reqwest::Response) -> Result<T, NotifyError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();
        let body: TelegramApiResponse<T> = response.json().await.map_err(|e| {
            NotifyError::DeliveryFailed(format!("unexpected response ({status}): {}", e.without_url()))
        })?;

        if !body.ok {
            return Err(NotifyError::Rejected(
                body.description
                    .unwrap_or_else(|| format!("status {status}")),
            ));
        }
        body.result
            .ok_or_else(|| NotifyError::DeliveryFailed("response without result".into()))
    }
}

// request errors carry the URL, which embeds the bot token
fn request_error(e: reqwest::Error) -> NotifyError {
    if e.is_timeout() {
        NotifyError::Timeout
    } else {
        NotifyError::DeliveryFailed(e.without_url().to_string())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, target: &NotificationTarget, text: &str) -> Result<(), NotifyError> {
        if !target.is_configured() {
            return Err(NotifyError::NotConfigured);
        }
        let body = serde_json::json!({
            "chat_id": target.chat_id.trim(),
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self
            .client
            .post(self.method_url(&target.bot_token, "sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let _: serde_json::Value = Self::read_response(response).await?;
        tracing::debug!(chat_id = %target.chat_id, "telegram message delivered");
        Ok(())
    }

    async fn verify(&self, target: &NotificationTarget) -> Result<BotIdentity, NotifyError> {
        if !target.has_token() {
            return Err(NotifyError::NotConfigured);
        }
        let response = self
            .client
            .get(self.method_url(&target.bot_token, "getMe"))
            .send()
            .await
            .map_err(request_error)?;

        let user: TelegramUser = Self::read_response(response).await?;
        Ok(BotIdentity {
            username: user.username,
            first_name: user.first_name,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TelegramApiResponse<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct TelegramUser {
    first_name: String,
    username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn target() -> NotificationTarget {
        NotificationTarget::new("123:abc", "-1001")
    }

    fn notifier(server: &MockServer) -> TelegramNotifier {
        TelegramNotifier::with_api_url(server.uri(), Duration::from_millis(300)).unwrap()
    }

    #[tokio::test]
    async fn send_posts_markdown_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": "-1001",
                "text": "*merhaba*",
                "parse_mode": "Markdown",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": {"message_id": 7}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        notifier(&server).send(&target(), "*merhaba*").await.unwrap();
    }

    #[tokio::test]
    async fn api_rejection_carries_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found",
            })))
            .mount(&server)
            .await;

        let err = notifier(&server).send(&target(), "hi").await.unwrap_err();

        assert!(matches!(err, NotifyError::Rejected(ref d) if d.contains("chat not found")));
    }

    #[tokio::test]
    async fn slow_api_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": {}}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = notifier(&server).send(&target(), "hi").await.unwrap_err();

        assert!(matches!(err, NotifyError::Timeout));
    }

    #[tokio::test]
    async fn send_without_chat_id_is_not_configured() {
        let server = MockServer::start().await;

        let err = notifier(&server)
            .send(&NotificationTarget::new("123:abc", ""), "hi")
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::NotConfigured));
    }

    #[tokio::test]
    async fn verify_returns_bot_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bot123:abc/getMe"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"id": 1, "is_bot": true, "first_name": "Rota", "username": "rota_bot"},
            })))
            .mount(&server)
            .await;

        let bot = notifier(&server).verify(&target()).await.unwrap();

        assert_eq!(bot.display_name(), "@rota_bot");
        assert_eq!(bot.first_name, "Rota");
    }

    #[tokio::test]
    async fn verify_with_bad_token_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bot123:abc/getMe"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 401,
                "description": "Unauthorized",
            })))
            .mount(&server)
            .await;

        let err = notifier(&server).verify(&target()).await.unwrap_err();

        assert!(matches!(err, NotifyError::Rejected(ref d) if d == "Unauthorized"));
    }
}
