//! Submission Coordinator
//!
//! Turns the pending list plus the shopper's contact details into one
//! enquiry document in the hosted store, with a best-effort mail
//! notification on the side. Either the remote write commits and the local
//! store is cleared, or it fails and nothing local changes.

use crate::error::{ApiError, ApiResult};
use crate::store::EnquiryStore;
use lithos_common::enquiry::EnquirySubmission;
use lithos_common::events::{EventBus, LithosEvent};
use lithos_common::mail::{EnquiryMail, EnquiryMailer};
use lithos_common::remote::EnquiryBackend;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Minimum accepted contact-name length (after trimming)
const MIN_NAME_LEN: usize = 2;

/// Contact details accompanying a batch enquiry
#[derive(Debug, Clone, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactDetails {
    /// Field-level validation; the first offending field is reported
    fn validate(&self) -> ApiResult<()> {
        if self.name.trim().len() < MIN_NAME_LEN {
            return Err(ApiError::BadRequest(format!(
                "name: must be at least {MIN_NAME_LEN} characters"
            )));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ApiError::BadRequest(
                "email: not a valid email address".to_string(),
            ));
        }
        if self.phone.trim().is_empty() {
            return Err(ApiError::BadRequest("phone: must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Syntactic email check: one @, non-empty local part, dotted domain
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Coordinates the submit action: validate, persist remotely, notify,
/// clear local state
pub struct SubmissionCoordinator {
    store: Arc<dyn EnquiryStore>,
    backend: Arc<dyn EnquiryBackend>,
    /// None when the mail side channel is disabled by configuration
    mailer: Option<Arc<dyn EnquiryMailer>>,
    mail_to: String,
    event_bus: EventBus,
    /// In-flight guard: one submission at a time per service
    submitting: AtomicBool,
}

impl SubmissionCoordinator {
    pub fn new(
        store: Arc<dyn EnquiryStore>,
        backend: Arc<dyn EnquiryBackend>,
        mailer: Option<Arc<dyn EnquiryMailer>>,
        mail_to: String,
        event_bus: EventBus,
    ) -> Self {
        Self {
            store,
            backend,
            mailer,
            mail_to,
            event_bus,
            submitting: AtomicBool::new(false),
        }
    }

    /// Run one submit action
    ///
    /// Returns the server-assigned enquiry document id. On any failure
    /// before the remote write commits, the local store is left untouched
    /// and the shopper may retry.
    pub async fn submit(&self, contact: ContactDetails) -> ApiResult<String> {
        contact.validate()?;

        let _guard = self.acquire_in_flight()?;

        let items = self.store.load();
        if items.is_empty() {
            return Err(ApiError::BadRequest(
                "No pending enquiry items to submit".to_string(),
            ));
        }

        let submission = EnquirySubmission::new(
            contact.name.trim().to_string(),
            contact.email.trim().to_string(),
            contact.phone.trim().to_string(),
            contact.message.filter(|m| !m.trim().is_empty()),
            &items,
            chrono::Utc::now().date_naive(),
        );

        // Step 1: the remote document is the source of truth
        let enquiry_id = self.backend.create_enquiry(&submission).await?;

        // Step 2: best-effort notification, never on the success path
        self.dispatch_notification(&submission);

        // Step 3: clear local state now that the write has committed
        self.store.save(&[])?;
        self.event_bus.emit_lossy(LithosEvent::EnquiryListChanged {
            count: 0,
            timestamp: chrono::Utc::now(),
        });
        self.event_bus.emit_lossy(LithosEvent::EnquirySubmitted {
            timestamp: chrono::Utc::now(),
        });

        info!(
            "Submitted enquiry {} with {} line item(s)",
            enquiry_id,
            items.len()
        );
        Ok(enquiry_id)
    }

    /// Claim the in-flight slot; released when the returned guard drops
    fn acquire_in_flight(&self) -> ApiResult<InFlightGuard<'_>> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ApiError::Conflict(
                "A submission is already in progress".to_string(),
            ));
        }
        Ok(InFlightGuard {
            flag: &self.submitting,
        })
    }

    /// Fire-and-forget the notification mail on its own task
    fn dispatch_notification(&self, submission: &EnquirySubmission) {
        let Some(mailer) = &self.mailer else {
            debug!("Mail side channel disabled; skipping notification");
            return;
        };

        let mail = EnquiryMail::for_submission(submission, &self.mail_to);
        let mailer = Arc::clone(mailer);
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&mail).await {
                // The enquiry document is already persisted; log and move on
                error!("Enquiry notification mail failed: {}", e);
            }
        });
    }
}

/// Clears the in-flight flag when the submit future completes or is dropped
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
