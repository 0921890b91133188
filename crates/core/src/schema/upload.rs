//! Object-storage uploads.

use serde::{Deserialize, Serialize};

/// Location of an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Public URL of the object.
    pub url: String,
    /// Bucket key, used when deleting or replacing the object later.
    pub key: String,
}
