//! Hosted document-store client
//!
//! The "enquiries" collection lives in a hosted document database reached
//! over JSON REST. The shop only ever creates documents; listing and status
//! updates belong to the admin back office.

use crate::config::DocumentStoreConfig;
use crate::enquiry::{EnquiryStatus, EnquirySubmission};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Collection holding batch enquiries
const ENQUIRIES_COLLECTION: &str = "enquiries";

/// Default timeout for document-store requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// An enquiry document as returned by the hosted store
///
/// The store wraps the submission with its own id and ordering timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEnquiry {
    pub id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    pub submission: EnquirySubmission,
}

/// Access to the hosted "enquiries" collection
///
/// Injectable so the submission workflow and the back office can be tested
/// against an in-memory fake.
#[async_trait]
pub trait EnquiryBackend: Send + Sync {
    /// Persist one submission; returns the server-assigned document id
    async fn create_enquiry(&self, submission: &EnquirySubmission) -> Result<String>;

    /// List all enquiries, newest first
    async fn list_enquiries(&self) -> Result<Vec<StoredEnquiry>>;

    /// Update the status field of one enquiry document
    async fn update_status(&self, id: &str, status: EnquiryStatus) -> Result<()>;
}

/// JSON REST client for the hosted document store
pub struct HttpEnquiryBackend {
    http_client: reqwest::Client,
    base_url: String,
    database: String,
    api_key: String,
}

/// Create-document response from the store
#[derive(Debug, Deserialize)]
struct CreateDocumentResponse {
    id: String,
}

/// List-documents response envelope
#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    documents: Vec<StoredEnquiry>,
}

impl HttpEnquiryBackend {
    /// Create a client from the document-store configuration
    pub fn new(config: &DocumentStoreConfig) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            database: config.database.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn collection_url(&self) -> String {
        format!(
            "{}/v1/databases/{}/collections/{}/documents",
            self.base_url, self.database, ENQUIRIES_COLLECTION
        )
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

#[async_trait]
impl EnquiryBackend for HttpEnquiryBackend {
    async fn create_enquiry(&self, submission: &EnquirySubmission) -> Result<String> {
        let response = self
            .http_client
            .post(self.collection_url())
            .header("X-Api-Key", &self.api_key)
            .json(submission)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "create enquiry failed: HTTP {}",
                response.status()
            )));
        }

        let created: CreateDocumentResponse = response.json().await?;
        debug!("Created enquiry document {}", created.id);
        Ok(created.id)
    }

    async fn list_enquiries(&self) -> Result<Vec<StoredEnquiry>> {
        let response = self
            .http_client
            .get(self.collection_url())
            .header("X-Api-Key", &self.api_key)
            .query(&[("order", "createdAt:desc")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "list enquiries failed: HTTP {}",
                response.status()
            )));
        }

        let list: ListDocumentsResponse = response.json().await?;
        Ok(list.documents)
    }

    async fn update_status(&self, id: &str, status: EnquiryStatus) -> Result<()> {
        let response = self
            .http_client
            .patch(self.document_url(id))
            .header("X-Api-Key", &self.api_key)
            .json(&json!({ "status": status }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("enquiry {id}")));
        }
        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "update status failed: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}
