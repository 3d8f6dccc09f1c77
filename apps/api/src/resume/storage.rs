use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::errors::AppError;

/// Upload filter limits, enforced before any store access.
pub const MAX_RESUME_BYTES: usize = 2 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document", // .docx
    "application/msword",                                                      // .doc
];

pub fn is_allowed_mime(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

/// Flattens an email into a key-safe token: `@` -> `_at_`, `.` -> `_`.
pub fn sanitize_email(email: &str) -> String {
    email.replace('@', "_at_").replace('.', "_")
}

/// File name of the stored object: sanitized email + ms timestamp + the
/// original extension. The timestamp keeps every upload distinct.
pub fn object_file_name(email: &str, original_name: &str, at: DateTime<Utc>) -> String {
    let extension = original_name.rsplit('.').next().unwrap_or_default();
    format!(
        "{}_{}.{}",
        sanitize_email(email),
        at.timestamp_millis(),
        extension
    )
}

/// Bucket key of the stored object, namespaced per user.
pub fn object_key(email: &str, file_name: &str) -> String {
    format!("{email}/{file_name}")
}

pub fn public_url(endpoint: &str, bucket: &str, key: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key)
}

/// Writes the object. The conditional write refuses to replace an existing
/// key, so an upload can never clobber a previous resume.
pub async fn put_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    data: Bytes,
    content_type: &str,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .if_none_match("*")
        .body(ByteStream::from(data))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Failed to upload resume to storage: {e}")))?;
    Ok(())
}

pub async fn delete_object(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<(), AppError> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("Failed to delete resume object: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mime_allow_list() {
        assert!(is_allowed_mime("application/pdf"));
        assert!(is_allowed_mime("application/msword"));
        assert!(is_allowed_mime(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        ));
        assert!(!is_allowed_mime("image/png"));
        assert!(!is_allowed_mime("text/plain"));
    }

    #[test]
    fn test_sanitize_email() {
        assert_eq!(sanitize_email("jo@x.com"), "jo_at_x_com");
        assert_eq!(sanitize_email("first.last@sub.org"), "first_last_at_sub_org");
    }

    #[test]
    fn test_object_file_name_embeds_email_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let name = object_file_name("jo@x.com", "cv.pdf", at);
        assert_eq!(name, format!("jo_at_x_com_{}.pdf", at.timestamp_millis()));
    }

    #[test]
    fn test_object_file_name_keeps_last_extension() {
        let at = Utc::now();
        let name = object_file_name("jo@x.com", "my.resume.docx", at);
        assert!(name.ends_with(".docx"));
    }

    #[test]
    fn test_object_key_is_namespaced_by_email() {
        assert_eq!(object_key("jo@x.com", "f.pdf"), "jo@x.com/f.pdf");
    }

    #[test]
    fn test_distinct_timestamps_give_distinct_names() {
        let a = Utc.timestamp_millis_opt(1_000).unwrap();
        let b = Utc.timestamp_millis_opt(2_000).unwrap();
        assert_ne!(
            object_file_name("jo@x.com", "cv.pdf", a),
            object_file_name("jo@x.com", "cv.pdf", b)
        );
    }

    #[test]
    fn test_public_url_trims_trailing_slash() {
        assert_eq!(
            public_url("http://minio:9000/", "resumes", "jo@x.com/f.pdf"),
            "http://minio:9000/resumes/jo@x.com/f.pdf"
        );
    }
}
