//! Claim notification emails
//!
//! Fire-and-forget: a send returns `true`/`false` and never an error, so
//! reward state can never be blocked by the mail provider. Behind a trait
//! so tests can record sends instead of hitting the network.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::AppConfig;

/// One claim-confirmation email
#[derive(Debug, Clone)]
pub struct ClaimEmail {
    pub to: String,
    pub user_name: String,
    pub reward_title: String,
    pub campaign_title: String,
    pub claim_url: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Returns whether the message was accepted by the provider.
    async fn send_claim_email(&self, email: &ClaimEmail) -> bool;
}

/// Production sender posting to an HTTP email API (Resend-compatible)
pub struct HttpEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailSender {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.email_api_url.clone(),
            api_key: config.email_api_key.clone(),
            from: config.email_from.clone(),
        }
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send_claim_email(&self, email: &ClaimEmail) -> bool {
        let payload = serde_json::json!({
            "from": self.from,
            "to": [email.to],
            "subject": format!("Your reward \"{}\" is ready to claim", email.reward_title),
            "html": format!(
                "<p>Hi {},</p>\
                 <p>Your reward <strong>{}</strong> from the campaign \
                 <strong>{}</strong> is ready.</p>\
                 <p><a href=\"{}\">Claim your reward</a></p>",
                email.user_name, email.reward_title, email.campaign_title, email.claim_url
            ),
        });

        match self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                debug!(to = %email.to, reward = %email.reward_title, "Claim email sent");
                true
            }
            Ok(resp) => {
                warn!(
                    to = %email.to,
                    status = %resp.status(),
                    "Email provider rejected claim email"
                );
                false
            }
            Err(e) => {
                warn!(to = %email.to, error = %e, "Failed to send claim email");
                false
            }
        }
    }
}

/// Claim-confirmation link shown in the email body.
pub fn claim_url(app_base_url: &str, campaign_slug: &str, reward_id: i32) -> String {
    format!(
        "{}/campaign/{}?claim={}",
        app_base_url.trim_end_matches('/'),
        campaign_slug,
        reward_id
    )
}
