use std::io;
use std::path::PathBuf;

use reqwest::blocking::multipart::Form;

use crate::{Params, MEDIA_FIELD};

/// A `multipart/form-data` upload: media files followed by plain fields.
///
/// Each file becomes a `media[]` part named after its base name. Fields
/// are written after every file part. Files are only opened when the
/// request is built and are closed once it has been sent.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    files: Vec<PathBuf>,
    fields: Params,
}

impl MultipartBody {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn fields(mut self, fields: Params) -> Self {
        self.fields = self.fields.merge(fields);
        self
    }

    pub fn field_params(&self) -> &Params {
        &self.fields
    }

    pub fn file_paths(&self) -> &[PathBuf] {
        &self.files
    }

    /// Opens every file and lays out the form. Fails if a file cannot be
    /// opened.
    pub(crate) fn into_form(self) -> io::Result<Form> {
        let mut form = Form::new();
        for path in self.files {
            form = form.file(MEDIA_FIELD, path)?;
        }
        for (key, value) in self.fields.pairs() {
            form = form.text(key.to_owned(), value.to_owned());
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fails_to_open() {
        let body = MultipartBody::new().file("/nonexistent/media.png");
        let err = body.into_form().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn fields_merge_last_write_wins() {
        let mut first = Params::new();
        first.set("status", "draft");
        let mut second = Params::new();
        second.set("status", "final");

        let body = MultipartBody::new()
            .files(vec!["a.png", "b.png"])
            .fields(first)
            .fields(second);
        assert_eq!(body.field_params().get("status"), Some("final"));
        assert_eq!(body.file_paths().len(), 2);
    }
}
