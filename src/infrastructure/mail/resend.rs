use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::errors::MailError;
use crate::settings::AppConfig;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Outbound transactional mail. Callers treat dispatch as best-effort:
/// failures are logged, never propagated to the primary action.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_submission_confirmation(&self, to: &str, project_title: &str) -> Result<(), MailError>;
}

pub struct ResendMailer {
    http: Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    /// Returns None when no credential is configured, which disables
    /// dispatch entirely.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let api_key = config.resend_api_key.clone()?;
        Some(ResendMailer {
            http: Client::new(),
            api_key,
            from: config.mail_from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_submission_confirmation(&self, to: &str, project_title: &str) -> Result<(), MailError> {
        let body = json!({
            "from": self.from,
            "to": to,
            "subject": format!("Project Submission Received: {}", project_title),
            "html": format!(
                "<h1>Thank you for submitting your project!</h1>\
                 <p>We have received your submission of <strong>{}</strong> and it is pending review.</p>\
                 <p>We'll notify you once it's approved.</p>",
                project_title
            ),
        });

        let response = self.http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected(format!("{}: {}", status, detail)));
        }

        Ok(())
    }
}
