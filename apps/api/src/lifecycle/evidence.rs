//! Evidence attachments for the publish flow: pre-flight validation of the
//! pending file list, the pluggable object store, and the fan-out upload
//! that commits all-or-nothing.
//!
//! Every limit is checked client-side of the network: an oversized or
//! mistyped file never reaches the store.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

pub const MAX_EVIDENCE_FILES: usize = 5;
pub const MAX_EVIDENCE_BYTES: usize = 10 * 1024 * 1024;
pub const ALLOWED_EVIDENCE_MIME: &[&str] = &["image/jpeg", "image/png", "video/mp4"];

#[derive(Debug, Clone)]
pub struct EvidenceFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// The pending evidence list. Files enter only through `try_add`, so a
/// constructed batch is always within limits; a rejected file leaves the
/// list untouched.
#[derive(Debug, Default)]
pub struct EvidenceBatch {
    files: Vec<EvidenceFile>,
}

impl EvidenceBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_add(&mut self, file: EvidenceFile) -> Result<(), AppError> {
        if self.files.len() >= MAX_EVIDENCE_FILES {
            return Err(AppError::Validation(format!(
                "Maximum {MAX_EVIDENCE_FILES} evidence files allowed"
            )));
        }
        if !ALLOWED_EVIDENCE_MIME.contains(&file.content_type.as_str()) {
            return Err(AppError::Validation(format!(
                "File type '{}' not allowed; accepted: {}",
                file.content_type,
                ALLOWED_EVIDENCE_MIME.join(", ")
            )));
        }
        if file.bytes.len() > MAX_EVIDENCE_BYTES {
            return Err(AppError::Validation(format!(
                "File '{}' exceeds the 10MB limit",
                file.file_name
            )));
        }
        self.files.push(file);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_files(self) -> Vec<EvidenceFile> {
        self.files
    }
}

/// An uploaded object: the store key (needed to compensate) and the public
/// URL persisted on the request row.
#[derive(Debug, Clone)]
pub struct UploadedEvidence {
    pub key: String,
    pub url: String,
}

/// Object storage behind the publish flow. Production uses S3/MinIO;
/// tests use an in-memory fake.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    /// Stores the object and returns its public URL.
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<String, AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// S3-backed store (MinIO locally, AWS in production).
pub struct S3EvidenceStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    endpoint: String,
}

impl S3EvidenceStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String, endpoint: String) -> Self {
        Self {
            client,
            bucket,
            endpoint,
        }
    }
}

#[async_trait]
impl EvidenceStore for S3EvidenceStore {
    async fn put(&self, key: &str, content_type: &str, body: Bytes) -> Result<String, AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("put {key}: {e}")))?;

        Ok(format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.bucket,
            key
        ))
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("delete {key}: {e}")))?;
        Ok(())
    }
}

/// Reduces a client-supplied filename to something safe to embed in an
/// object key: path components are stripped and anything outside a small
/// ASCII set becomes an underscore.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "archivo".to_string()
    } else {
        trimmed.to_string()
    }
}

fn object_key(request_id: Uuid, index: usize, file_name: &str) -> String {
    format!("evidence/{request_id}/{index}_{}", sanitize_file_name(file_name))
}

/// Uploads all files concurrently and joins on the full set. If any upload
/// fails, every object that did land is deleted again and the first error
/// is returned — a publish never leaves partial evidence behind.
pub async fn upload_evidence(
    store: Arc<dyn EvidenceStore>,
    request_id: Uuid,
    batch: EvidenceBatch,
) -> Result<Vec<UploadedEvidence>, AppError> {
    let mut set = JoinSet::new();
    for (index, file) in batch.into_files().into_iter().enumerate() {
        let store = Arc::clone(&store);
        let key = object_key(request_id, index, &file.file_name);
        set.spawn(async move {
            let result = store.put(&key, &file.content_type, file.bytes).await;
            (key, result)
        });
    }

    let mut uploaded: Vec<UploadedEvidence> = Vec::new();
    let mut first_err: Option<AppError> = None;

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((key, Ok(url))) => uploaded.push(UploadedEvidence { key, url }),
            Ok((key, Err(e))) => {
                warn!("evidence upload failed for {key}: {e}");
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
            Err(e) => {
                if first_err.is_none() {
                    first_err = Some(AppError::Internal(anyhow::anyhow!(
                        "evidence upload task failed: {e}"
                    )));
                }
            }
        }
    }

    if let Some(err) = first_err {
        delete_uploaded(&store, &uploaded).await;
        return Err(err);
    }

    // Completion order is arbitrary; restore submission order via the
    // index-prefixed keys.
    uploaded.sort_by(|a, b| a.key.cmp(&b.key));
    info!(
        "Uploaded {} evidence files for request {request_id}",
        uploaded.len()
    );
    Ok(uploaded)
}

/// Compensation path: best-effort removal of objects that landed before a
/// sibling upload failed. A failed delete is logged as an orphan.
pub async fn delete_uploaded(store: &Arc<dyn EvidenceStore>, uploaded: &[UploadedEvidence]) {
    for obj in uploaded {
        if let Err(e) = store.delete(&obj.key).await {
            warn!("orphaned evidence object {}: cleanup failed: {e}", obj.key);
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory store for tests. Keys containing `fail_on` make `put` fail.
    #[derive(Default)]
    pub struct MemoryEvidenceStore {
        pub objects: Mutex<HashMap<String, (String, Bytes)>>,
        pub fail_on: Option<String>,
    }

    impl MemoryEvidenceStore {
        pub fn failing_on(fragment: &str) -> Self {
            Self {
                objects: Mutex::new(HashMap::new()),
                fail_on: Some(fragment.to_string()),
            }
        }

        pub fn object_count(&self) -> usize {
            self.objects.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EvidenceStore for MemoryEvidenceStore {
        async fn put(
            &self,
            key: &str,
            content_type: &str,
            body: Bytes,
        ) -> Result<String, AppError> {
            if let Some(fragment) = &self.fail_on {
                if key.contains(fragment.as_str()) {
                    return Err(AppError::Storage(format!("simulated failure for {key}")));
                }
            }
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), (content_type.to_string(), body));
            Ok(format!("mem://{key}"))
        }

        async fn delete(&self, key: &str) -> Result<(), AppError> {
            self.objects.lock().unwrap().remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryEvidenceStore;
    use super::*;

    fn jpeg(name: &str, size: usize) -> EvidenceFile {
        EvidenceFile {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn test_oversized_file_rejected_before_upload() {
        let mut batch = EvidenceBatch::new();
        let err = batch.try_add(jpeg("fuga.jpg", 12 * 1024 * 1024)).unwrap_err();
        assert!(err.to_string().contains("10MB"));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_sixth_file_rejected_and_list_unchanged() {
        let mut batch = EvidenceBatch::new();
        for i in 0..5 {
            batch.try_add(jpeg(&format!("foto{i}.jpg"), 1024)).unwrap();
        }
        let err = batch.try_add(jpeg("foto5.jpg", 1024)).unwrap_err();
        assert!(err.to_string().contains("Maximum 5"));
        assert_eq!(batch.len(), 5);
    }

    #[test]
    fn test_disallowed_mime_rejected() {
        let mut batch = EvidenceBatch::new();
        let err = batch
            .try_add(EvidenceFile {
                file_name: "clip.gif".to_string(),
                content_type: "image/gif".to_string(),
                bytes: Bytes::from_static(b"gif"),
            })
            .unwrap_err();
        assert!(err.to_string().contains("image/gif"));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_allowed_mimes_accepted() {
        let mut batch = EvidenceBatch::new();
        for (name, mime) in [
            ("a.jpg", "image/jpeg"),
            ("b.png", "image/png"),
            ("c.mp4", "video/mp4"),
        ] {
            batch
                .try_add(EvidenceFile {
                    file_name: name.to_string(),
                    content_type: mime.to_string(),
                    bytes: Bytes::from_static(b"data"),
                })
                .unwrap();
        }
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_object_key_strips_path_components() {
        let id = Uuid::new_v4();
        assert_eq!(
            object_key(id, 0, "../../etc/passwd"),
            format!("evidence/{id}/0_passwd")
        );
        assert_eq!(
            object_key(id, 1, "C:\\fotos\\fuga.jpg"),
            format!("evidence/{id}/1_fuga.jpg")
        );
    }

    #[test]
    fn test_object_key_replaces_unsafe_characters() {
        let id = Uuid::new_v4();
        assert_eq!(
            object_key(id, 0, "fuga ba\u{f1}o\n.jpg"),
            format!("evidence/{id}/0_fuga_ba_o_.jpg")
        );
    }

    #[test]
    fn test_object_key_never_empty_for_degenerate_names() {
        let id = Uuid::new_v4();
        for name in ["", "..", "/", "..."] {
            assert_eq!(object_key(id, 0, name), format!("evidence/{id}/0_archivo"));
        }
    }

    #[test]
    fn test_plain_filenames_pass_through() {
        let id = Uuid::new_v4();
        assert_eq!(
            object_key(id, 2, "antes.jpg"),
            format!("evidence/{id}/2_antes.jpg")
        );
    }

    #[test]
    fn test_exactly_10mb_is_allowed() {
        let mut batch = EvidenceBatch::new();
        batch.try_add(jpeg("limit.jpg", MAX_EVIDENCE_BYTES)).unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[tokio::test]
    async fn test_upload_fan_out_success() {
        let store: Arc<dyn EvidenceStore> = Arc::new(MemoryEvidenceStore::default());
        let request_id = Uuid::new_v4();

        let mut batch = EvidenceBatch::new();
        batch.try_add(jpeg("antes.jpg", 100)).unwrap();
        batch.try_add(jpeg("despues.jpg", 100)).unwrap();

        let uploaded = upload_evidence(Arc::clone(&store), request_id, batch)
            .await
            .unwrap();
        assert_eq!(uploaded.len(), 2);
        // Submission order restored regardless of completion order.
        assert!(uploaded[0].key.contains("0_antes.jpg"));
        assert!(uploaded[1].key.contains("1_despues.jpg"));
        assert!(uploaded[0].url.starts_with("mem://"));
    }

    #[tokio::test]
    async fn test_failed_upload_compensates_and_aborts() {
        let mem = Arc::new(MemoryEvidenceStore::failing_on("1_malo.jpg"));
        let store: Arc<dyn EvidenceStore> = mem.clone();
        let request_id = Uuid::new_v4();

        let mut batch = EvidenceBatch::new();
        batch.try_add(jpeg("bueno.jpg", 100)).unwrap();
        batch.try_add(jpeg("malo.jpg", 100)).unwrap();
        batch.try_add(jpeg("otro.jpg", 100)).unwrap();

        let result = upload_evidence(store, request_id, batch).await;
        assert!(result.is_err());
        // Whatever landed before the failure was deleted again.
        assert_eq!(mem.object_count(), 0);
    }
}
