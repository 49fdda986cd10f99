//! Local pending-enquiry store
//!
//! The pending enquiry list lives in one JSON file under the root folder:
//! an array of line items, replaced wholesale on every save. Whichever
//! writer saves last wins; there is no merge. Reads degrade to the empty
//! list on absent or malformed content - a broken pending file must never
//! take the shopfront down.

use lithos_common::enquiry::EnquiryLineItem;
use lithos_common::Result;
use std::path::PathBuf;
use tracing::warn;

/// Pending-enquiry repository
///
/// Injectable so the workflow can be tested against a fake; the production
/// implementation is [`JsonFileStore`].
pub trait EnquiryStore: Send + Sync {
    /// Load the persisted sequence; absent or malformed content is empty
    fn load(&self) -> Vec<EnquiryLineItem>;

    /// Overwrite the persisted sequence entirely
    fn save(&self, items: &[EnquiryLineItem]) -> Result<()>;
}

/// JSON-file-backed pending-enquiry store
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl EnquiryStore for JsonFileStore {
    fn load(&self) -> Vec<EnquiryLineItem> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read pending enquiries ({}): {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "Malformed pending-enquiry file ({}), treating as empty: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[EnquiryLineItem]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| lithos_common::Error::Internal(format!("serialize pending enquiries: {e}")))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
