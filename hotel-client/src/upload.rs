//! Image upload helper
//!
//! Files are checked locally first (image MIME type, non-empty, size
//! ceiling for the asset kind) and only then sent as multipart to
//! `POST /api/upload?folder=<folder>`, which answers `{ "url": "..." }`.
//!
//! Batches upload every file concurrently. One failure does not stop the
//! others; the batch reports what succeeded and what failed by index.

use std::collections::BTreeSet;

use futures::future::join_all;
use shared::SharedError;
use shared::upload::{AssetKind, UploadResponse};
use tokio::sync::watch;

use crate::client::HttpClient;
use crate::error::{ClientError, ClientResult};

const UPLOAD_PATH: &str = "/api/upload";

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Content type is guessed from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Use the content type reported by the browser / OS instead of guessing
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Where a file goes and how large it may be
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: usize,
    pub folder: String,
}

impl UploadPolicy {
    pub fn new(folder: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            max_bytes,
            folder: folder.into(),
        }
    }

    /// Reject anything that is not an image or exceeds the ceiling.
    pub fn validate(&self, file: &UploadFile) -> Result<(), SharedError> {
        if !file.content_type.starts_with("image/") {
            return Err(SharedError::UploadRejected(format!(
                "{} is not an image ({})",
                file.file_name, file.content_type
            )));
        }
        if file.bytes.is_empty() {
            return Err(SharedError::UploadRejected(format!(
                "{} is empty",
                file.file_name
            )));
        }
        if file.bytes.len() > self.max_bytes {
            return Err(SharedError::UploadRejected(format!(
                "{} is too large ({} bytes, max {}MB)",
                file.file_name,
                file.bytes.len(),
                self.max_bytes / 1024 / 1024
            )));
        }
        Ok(())
    }

    fn path(&self) -> String {
        format!("{}?folder={}", UPLOAD_PATH, urlencoding::encode(&self.folder))
    }
}

impl From<AssetKind> for UploadPolicy {
    fn from(kind: AssetKind) -> Self {
        Self::new(kind.folder(), kind.max_bytes())
    }
}

/// Progress of a batch: "uploading N of M"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadProgress {
    pub total: usize,
    pub completed: usize,
    /// Indices of files with a request in flight
    pub in_flight: BTreeSet<usize>,
}

/// Outcome of a batch upload
#[derive(Debug, Default)]
pub struct UploadBatch {
    /// `(index, url)` in input order
    pub uploaded: Vec<(usize, String)>,
    /// `(index, error)` in input order
    pub failed: Vec<(usize, ClientError)>,
}

impl UploadBatch {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Uploaded urls in input order
    pub fn urls(&self) -> Vec<String> {
        self.uploaded.iter().map(|(_, url)| url.clone()).collect()
    }

    /// Append the uploaded urls to a record's image list
    pub fn append_to(&self, images: &mut Vec<String>) {
        images.extend(self.uploaded.iter().map(|(_, url)| url.clone()));
    }

    /// Point a single-image field at the first uploaded url. The field is
    /// left alone when nothing was uploaded.
    pub fn replace_single(&self, image: &mut String) -> bool {
        match self.uploaded.first() {
            Some((_, url)) => {
                image.clone_from(url);
                true
            }
            None => false,
        }
    }

    /// One-line summary for a toast, e.g. "Uploaded 2 of 3 images"
    pub fn summary(&self) -> String {
        let total = self.uploaded.len() + self.failed.len();
        format!("Uploaded {} of {} images", self.uploaded.len(), total)
    }
}

/// Upload helper bound to a transport
#[derive(Debug)]
pub struct Uploader<C> {
    client: C,
    progress: watch::Sender<UploadProgress>,
}

impl<C: HttpClient> Uploader<C> {
    pub fn new(client: C) -> Self {
        let (progress, _) = watch::channel(UploadProgress::default());
        Self { client, progress }
    }

    /// Subscribe to batch progress
    pub fn progress(&self) -> watch::Receiver<UploadProgress> {
        self.progress.subscribe()
    }

    /// Validate and upload one file, returning its url.
    pub async fn upload(&self, file: &UploadFile, policy: &UploadPolicy) -> ClientResult<String> {
        if let Err(e) = policy.validate(file) {
            tracing::warn!(file = %file.file_name, error = %e, "Upload rejected");
            return Err(e.into());
        }

        let response: UploadResponse = self.client.post_file(&policy.path(), file).await?;
        if response.url.trim().is_empty() {
            return Err(ClientError::InvalidResponse(
                "Upload response has an empty url".to_string(),
            ));
        }
        tracing::info!(file = %file.file_name, url = %response.url, "Image uploaded");
        Ok(response.url)
    }

    /// Upload several files concurrently.
    pub async fn upload_many(&self, files: &[UploadFile], policy: &UploadPolicy) -> UploadBatch {
        self.progress.send_replace(UploadProgress {
            total: files.len(),
            ..Default::default()
        });

        let tasks = files.iter().enumerate().map(|(index, file)| async move {
            self.progress.send_modify(|p| {
                p.in_flight.insert(index);
            });
            let result = self.upload(file, policy).await;
            self.progress.send_modify(|p| {
                p.in_flight.remove(&index);
                p.completed += 1;
            });
            (index, result)
        });

        let mut batch = UploadBatch::default();
        for (index, result) in join_all(tasks).await {
            match result {
                Ok(url) => batch.uploaded.push((index, url)),
                Err(e) => batch.failed.push((index, e)),
            }
        }

        if !batch.is_complete() {
            tracing::warn!(
                uploaded = batch.uploaded.len(),
                failed = batch.failed.len(),
                "Batch upload partially failed"
            );
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> UploadPolicy {
        UploadPolicy::new("hotel/banners", 1024)
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(UploadFile::new("pool.JPG", vec![1]).content_type, "image/jpeg");
        assert_eq!(UploadFile::new("menu.pdf", vec![1]).content_type, "application/pdf");
        assert_eq!(
            UploadFile::new("noext", vec![1]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_rejects_non_image() {
        let err = policy()
            .validate(&UploadFile::new("menu.pdf", vec![1, 2, 3]))
            .unwrap_err();
        assert!(err.to_string().contains("is not an image"));
    }

    #[test]
    fn test_rejects_oversized_and_empty() {
        let big = UploadFile::new("hall.png", vec![0; 1025]);
        assert!(policy().validate(&big).is_err());

        let exact = UploadFile::new("hall.png", vec![0; 1024]);
        assert!(policy().validate(&exact).is_ok());

        let empty = UploadFile::new("hall.png", vec![]);
        assert!(policy().validate(&empty).is_err());
    }

    #[test]
    fn test_explicit_content_type_wins() {
        let file = UploadFile::new("upload", vec![1]).with_content_type("image/webp");
        assert!(policy().validate(&file).is_ok());
    }

    #[test]
    fn test_policy_path() {
        assert_eq!(policy().path(), "/api/upload?folder=hotel%2Fbanners");
        let odd = UploadPolicy::new("hotel/sea view&pool", 1);
        assert_eq!(odd.path(), "/api/upload?folder=hotel%2Fsea%20view%26pool");
    }

    #[test]
    fn test_policy_from_kind() {
        let p = UploadPolicy::from(AssetKind::Testimonial);
        assert_eq!(p.folder, "hotel/testimonials");
        assert_eq!(p.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_batch_summary() {
        let batch = UploadBatch {
            uploaded: vec![(0, "a".into()), (2, "c".into())],
            failed: vec![(1, ClientError::Validation("bad".into()))],
        };
        assert_eq!(batch.summary(), "Uploaded 2 of 3 images");
        let mut images = vec!["existing".to_string()];
        batch.append_to(&mut images);
        assert_eq!(images, vec!["existing", "a", "c"]);
    }

    #[test]
    fn test_replace_single_keeps_field_on_failure() {
        let mut cover = "old.jpg".to_string();
        let failed = UploadBatch {
            uploaded: vec![],
            failed: vec![(0, ClientError::Validation("bad".into()))],
        };
        assert!(!failed.replace_single(&mut cover));
        assert_eq!(cover, "old.jpg");

        let ok = UploadBatch {
            uploaded: vec![(0, "new.jpg".into())],
            failed: vec![],
        };
        assert!(ok.replace_single(&mut cover));
        assert_eq!(cover, "new.jpg");
    }
}
