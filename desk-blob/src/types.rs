use bytes::Bytes;

/// An asset handed in by the admin: the raw bytes plus whatever the
/// browser told us about the file.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub bytes: Bytes,
    pub filename: Option<String>,
    pub content_type: Option<String>,
}

impl AssetUpload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: None,
            content_type: None,
        }
    }

    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Declared content type, or one guessed from the filename extension.
    pub fn effective_content_type(&self) -> Option<String> {
        self.content_type.clone().or_else(|| {
            self.filename
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())
                .map(|m| m.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_falls_back_to_filename() {
        let upload = AssetUpload::new(&b"png"[..]).with_filename("cover.png");
        assert_eq!(upload.effective_content_type().as_deref(), Some("image/png"));

        let upload = upload.with_content_type("image/webp");
        assert_eq!(upload.effective_content_type().as_deref(), Some("image/webp"));

        assert_eq!(AssetUpload::new(Bytes::new()).effective_content_type(), None);
    }
}
