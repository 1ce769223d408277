use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Persisted media item (table `media_items`).
///
/// `file_path` holds the generated on-disk filename, never the filename the
/// caller supplied. `id` and `uploaded_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct MediaItem {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}

/// List projection: `file_path` replaced by the fully qualified public URL.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentEntry {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ContentEntry {
    /// Build the projection for one row. `files_base` carries its trailing slash.
    pub fn from_item(item: &MediaItem, files_base: &str) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            category: item.category.clone(),
            url: format!("{}{}", files_base, item.file_path),
            uploaded_at: item.uploaded_at,
        }
    }
}

/// Response envelope for the admin upload path.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminUploadResponse {
    #[schema(example = "success")]
    pub status: String,
    pub item: MediaItem,
}

impl AdminUploadResponse {
    pub fn success(item: MediaItem) -> Self {
        Self {
            status: "success".to_string(),
            item,
        }
    }
}

/// Response envelope for the mobile upload path.
///
/// Failures on this path are reported inside the envelope (`success: false`)
/// with HTTP 200, matching what the mobile clients already parse.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MobileUploadResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MediaItem>,
}

impl MobileUploadResponse {
    pub fn uploaded(item: MediaItem) -> Self {
        Self {
            success: true,
            message: "Upload successful".to_string(),
            data: Some(item),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Outcome of an update: whether any field was actually touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Updated,
    NoChanges,
}

impl UpdateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateStatus::Updated => "updated",
            UpdateStatus::NoChanges => "no changes",
        }
    }
}

/// Response envelope for the update path.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateResponse {
    #[schema(example = "updated")]
    pub status: String,
    pub item: MediaItem,
}

impl UpdateResponse {
    pub fn new(status: UpdateStatus, item: MediaItem) -> Self {
        Self {
            status: status.as_str().to_string(),
            item,
        }
    }
}

/// Response envelope for the delete path. `admin` echoes the acting
/// identity's email for audit purposes and is null for key-based identities.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub admin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> MediaItem {
        MediaItem {
            id: 7,
            title: "Report".to_string(),
            category: "legal".to_string(),
            file_path: "3f2c9a.pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_content_entry_url_projection() {
        let entry = ContentEntry::from_item(&sample_item(), "http://127.0.0.1:8000/files/");
        assert_eq!(entry.url, "http://127.0.0.1:8000/files/3f2c9a.pdf");
        assert_eq!(entry.id, 7);
        assert_eq!(entry.category, "legal");
    }

    #[test]
    fn test_content_entry_has_no_file_path_field() {
        let entry = ContentEntry::from_item(&sample_item(), "http://h:1/files/");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("file_path").is_none());
        assert!(json.get("url").is_some());
    }

    #[test]
    fn test_admin_envelope_shape() {
        let json = serde_json::to_value(AdminUploadResponse::success(sample_item())).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["item"]["id"], 7);
    }

    #[test]
    fn test_mobile_envelope_failure_omits_data() {
        let json = serde_json::to_value(MobileUploadResponse::failure("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "boom");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_mobile_envelope_success_carries_item() {
        let json = serde_json::to_value(MobileUploadResponse::uploaded(sample_item())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["file_path"], "3f2c9a.pdf");
    }

    #[test]
    fn test_update_status_strings() {
        assert_eq!(UpdateStatus::Updated.as_str(), "updated");
        assert_eq!(UpdateStatus::NoChanges.as_str(), "no changes");
    }

    #[test]
    fn test_delete_response_null_admin() {
        let json = serde_json::to_value(DeleteResponse {
            message: "Deleted Report".to_string(),
            admin: None,
        })
        .unwrap();
        assert!(json["admin"].is_null());
    }
}
