//! File uploads to the object store buckets.

use edumall_core::DataResponse;
use edumall_core::schema::upload::UploadedFile;
use tracing::instrument;

use crate::error::ApiError;
use crate::http::{Endpoint, HttpClient, Upload};

/// Destination bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Image,
    File,
}

impl Bucket {
    const fn path(self) -> &'static str {
        match self {
            Self::Image => "buckets/image",
            Self::File => "buckets/file",
        }
    }
}

/// `POST buckets/{image,file}` as `multipart/form-data`.
#[must_use]
pub fn upload_endpoint(bucket: Bucket, upload: Upload, token: Option<&str>) -> Endpoint {
    Endpoint::post(bucket.path()).bearer(token).multipart(upload)
}

/// Upload an image (avatars, review photos).
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, upload, token), fields(file_name = %upload.file_name, len = upload.bytes.len()))]
pub async fn upload_image(
    http: &HttpClient,
    upload: Upload,
    token: Option<&str>,
) -> Result<DataResponse<UploadedFile>, ApiError> {
    http.send(upload_endpoint(Bucket::Image, upload, token)).await
}

/// Upload an arbitrary document.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not match its
/// schema.
#[instrument(skip(http, upload, token), fields(file_name = %upload.file_name, len = upload.bytes.len()))]
pub async fn upload_file(
    http: &HttpClient,
    upload: Upload,
    token: Option<&str>,
) -> Result<DataResponse<UploadedFile>, ApiError> {
    http.send(upload_endpoint(Bucket::File, upload, token)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::url;
    use crate::http::Body;

    #[test]
    fn test_upload_endpoints() {
        let upload = Upload {
            file_name: "avatar.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        };
        let image = upload_endpoint(Bucket::Image, upload.clone(), Some("tok"));
        assert_eq!(url(&image), "https://api.edumall.vn/api/buckets/image");
        assert!(matches!(image.body, Body::Multipart(ref u) if u.bytes.len() == 4));

        let file = upload_endpoint(Bucket::File, upload, Some("tok"));
        assert_eq!(url(&file), "https://api.edumall.vn/api/buckets/file");
    }
}
