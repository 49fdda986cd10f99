//! Transactional mail client
//!
//! The enquiry notification is a best-effort courtesy side channel: the
//! hosted enquiry document is the source of truth, and delivery failures are
//! logged by the caller, never surfaced to the shopper.

use crate::config::MailConfig;
use crate::enquiry::EnquirySubmission;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Default timeout for mail-provider requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One outbound notification message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnquiryMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EnquiryMail {
    /// Build the notification mail for a freshly submitted enquiry
    pub fn for_submission(submission: &EnquirySubmission, to: &str) -> Self {
        let mut body = format!(
            "New product enquiry\n\nName: {}\nEmail: {}\nPhone: {}\n",
            submission.name, submission.email, submission.phone
        );
        if let Some(message) = &submission.message {
            body.push_str(&format!("Message: {}\n", message));
        }
        body.push_str(&format!("Date: {}\n\n{}", submission.date, submission.project_details));

        Self {
            to: to.to_string(),
            subject: format!("New enquiry from {}", submission.name),
            body,
        }
    }
}

/// Outbound mail delivery seam, faked in tests
#[async_trait]
pub trait EnquiryMailer: Send + Sync {
    async fn send(&self, mail: &EnquiryMail) -> Result<()>;
}

/// HTTP client for the transactional mail provider
pub struct HttpEnquiryMailer {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpEnquiryMailer {
    /// Create a client from the mail configuration
    pub fn new(config: &MailConfig) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl EnquiryMailer for HttpEnquiryMailer {
    async fn send(&self, mail: &EnquiryMail) -> Result<()> {
        let response = self
            .http_client
            .post(format!("{}/v1/send", self.endpoint))
            .header("X-Api-Key", &self.api_key)
            .json(mail)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "mail send failed: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}
