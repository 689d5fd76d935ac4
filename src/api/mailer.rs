use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::TideError;

const SEND_PATH: &str = "/admin/api/email-proxy/send";

#[derive(Debug, Serialize)]
pub struct OutboundEmail<'a> {
    pub to: &'a str,
    pub cc: &'a str,
    pub subject: &'a str,
    pub text: &'a str,
}

/// The proxy answers 200 with its own success flag; a reported failure
/// carries the reason to surface verbatim.
#[derive(Deserialize)]
struct MailerResult {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Thin client for the external email-proxy endpoint. One authenticated
/// call, no retry; re-triggering is the operator's job.
#[derive(Clone)]
pub struct MailerApi {
    client: reqwest::Client,
    base_url: String,
    admin_token: String,
}

impl MailerApi {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.mailer_url.trim_end_matches('/').to_string(),
            admin_token: config.mailer_admin_token.clone(),
        }
    }

    pub async fn send(&self, email: &OutboundEmail<'_>) -> Result<(), TideError> {
        let resp = self
            .client
            .post(format!("{}{SEND_PATH}", self.base_url))
            .header("x-admin-token", &self.admin_token)
            .json(email)
            .send()
            .await?;

        let result: MailerResult = resp.json().await?;
        if result.success {
            Ok(())
        } else {
            Err(TideError::Mailer(result.error.unwrap_or_else(|| {
                "email proxy reported failure without a reason".to_string()
            })))
        }
    }
}
