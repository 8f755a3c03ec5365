/// Multipart upload glue
///
/// Collects multipart fields into memory, splits files from text fields,
/// and pushes files to the media store. Handlers look files up by their
/// form field name (avatar, coverImage, videoFile, thumbnail).
use crate::error::{AppError, Result};
use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use media_store::MediaStore;
use std::collections::HashMap;

const MAX_FILE_BYTES: usize = 100 * 1024 * 1024;

/// One uploaded file held in memory until it reaches the media store.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything a multipart form carried: files plus plain text fields.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub files: Vec<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl MultipartForm {
    pub fn file(&self, field_name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.field_name == field_name)
    }

    pub fn text(&self, field_name: &str) -> Option<&str> {
        self.fields.get(field_name).map(|s| s.as_str())
    }
}

/// Drain a multipart payload into memory.
pub async fn collect_form(mut payload: Multipart) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart payload: {}", e)))?
    {
        let (field_name, file_name) = {
            let disposition = field.content_disposition().ok_or_else(|| {
                AppError::BadRequest("Multipart field missing content disposition".to_string())
            })?;
            (
                disposition.get_name().unwrap_or_default().to_string(),
                disposition.get_filename().map(|f| f.to_string()),
            )
        };

        let content_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed reading multipart field: {}", e)))?
        {
            if bytes.len() + chunk.len() > MAX_FILE_BYTES {
                return Err(AppError::BadRequest(format!(
                    "File in field '{}' exceeds the upload size limit",
                    field_name
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        match file_name {
            Some(file_name) => form.files.push(UploadedFile {
                field_name,
                file_name,
                content_type,
                bytes,
            }),
            None => {
                let value = String::from_utf8(bytes).map_err(|_| {
                    AppError::BadRequest(format!("Field '{}' is not valid UTF-8", field_name))
                })?;
                form.fields.insert(field_name, value);
            }
        }
    }

    Ok(form)
}

/// Upload a collected file under `folder` and return its public URL.
pub async fn store_file(store: &MediaStore, file: &UploadedFile, folder: &str) -> Result<String> {
    let key = MediaStore::object_key(folder, &file.file_name);
    let url = store
        .upload(&key, file.bytes.clone(), &file.content_type)
        .await?;

    tracing::info!(field = %file.field_name, %key, "stored uploaded file");
    Ok(url)
}

/// Best-effort delete of a previously stored object by its public URL.
/// The owning record has already been updated, so a failed delete only
/// leaves an orphaned object behind and is logged rather than surfaced.
pub async fn discard_url(store: &MediaStore, url: &str) {
    let Some(key) = store.key_for_url(url) else {
        tracing::debug!(url, "url not served by the media store, nothing to delete");
        return;
    };

    if let Err(err) = store.delete(&key).await {
        tracing::warn!(%key, "failed to delete media object: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(field_name: &str) -> UploadedFile {
        UploadedFile {
            field_name: field_name.to_string(),
            file_name: "f.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn form_lookup_by_field_name() {
        let form = MultipartForm {
            files: vec![file("avatar"), file("coverImage")],
            fields: HashMap::from([("username".to_string(), "alice".to_string())]),
        };

        assert!(form.file("avatar").is_some());
        assert!(form.file("thumbnail").is_none());
        assert_eq!(form.text("username"), Some("alice"));
        assert_eq!(form.text("email"), None);
    }
}
