// ABOUTME: Transactional email client for recipe reports
// ABOUTME: HTTP implementation over a template-based email provider plus a no-op fallback

use crate::config::EmailConfig;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

/// A user-submitted report about a recipe, forwarded by email to the
/// moderation recipient
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReport {
    /// Reported recipe
    pub recipe_id: Uuid,
    /// Recipe title as the reporter saw it
    pub recipe_title: String,
    /// Reporter's name
    pub name: String,
    /// Reporter's email address
    pub email: String,
    /// Free-text report message
    pub message: String,
}

/// Outbound email collaborator
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Dispatch a recipe report to the configured moderation recipient
    async fn send_recipe_report(&self, report: &RecipeReport) -> AppResult<()>;
}

/// Mailer backed by a transactional email provider's HTTP API
pub struct HttpMailer {
    client: reqwest::Client,
    config: EmailConfig,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    text: String,
}

impl HttpMailer {
    /// Create a mailer from email configuration
    #[must_use]
    pub fn new(config: EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_recipe_report(&self, report: &RecipeReport) -> AppResult<()> {
        let body = SendRequest {
            from: &self.config.from_address,
            to: &self.config.report_recipient,
            subject: format!("Recipe report: {}", report.recipe_title),
            text: format!(
                "Recipe: {} ({})\nReported by: {} <{}>\n\n{}",
                report.recipe_title, report.recipe_id, report.name, report.email, report.message
            ),
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::external_service("email", format!("Dispatch failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                "email",
                format!("Provider returned {status}: {detail}"),
            ));
        }

        tracing::info!(recipe_id = %report.recipe_id, "recipe report email dispatched");
        Ok(())
    }
}

/// Mailer that logs and discards reports, used when no email provider is
/// configured and in tests
#[derive(Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_recipe_report(&self, report: &RecipeReport) -> AppResult<()> {
        tracing::warn!(
            recipe_id = %report.recipe_id,
            "no email provider configured, dropping recipe report"
        );
        Ok(())
    }
}
