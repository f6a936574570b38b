//! Delivery descriptors handed to the HTTP layer.

use std::path::PathBuf;

/// What a response layer needs to send a stored file to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Stream the file at `path`
    File {
        /// Local path of the content
        path: PathBuf,
        /// Content type to announce; empty means guess from `filename`
        content_type: String,
        /// Name offered to the client
        filename: String,
        /// Display inline rather than download
        inline: bool,
    },
    /// Redirect the client to a URL serving the content directly
    Redirect {
        /// Target URL
        url: String,
    },
}

impl Delivery {
    /// Deliver a local file.
    pub fn file(
        path: impl Into<PathBuf>,
        content_type: impl Into<String>,
        filename: impl Into<String>,
        inline: bool,
    ) -> Self {
        Delivery::File {
            path: path.into(),
            content_type: content_type.into(),
            filename: filename.into(),
            inline,
        }
    }

    /// Redirect to an externally served URL.
    pub fn redirect(url: impl Into<String>) -> Self {
        Delivery::Redirect { url: url.into() }
    }

    /// Content type for the response, guessed from the filename when none was given.
    ///
    /// Redirects carry no content type.
    pub fn effective_content_type(&self) -> Option<String> {
        match self {
            Delivery::File {
                content_type,
                filename,
                ..
            } => {
                if content_type.is_empty() {
                    Some(
                        mime_guess::from_path(filename)
                            .first_or_octet_stream()
                            .essence_str()
                            .to_string(),
                    )
                } else {
                    Some(content_type.clone())
                }
            }
            Delivery::Redirect { .. } => None,
        }
    }

    /// `Content-Disposition` header value for file deliveries.
    ///
    /// Non-ASCII filenames get an ASCII fallback plus an RFC 5987
    /// `filename*` parameter.
    ///
    /// # Example
    ///
    /// ```
    /// use depot_storage::Delivery;
    ///
    /// let delivery = Delivery::file("/srv/a.pdf", "application/pdf", "a.pdf", false);
    /// assert_eq!(
    ///     delivery.content_disposition().as_deref(),
    ///     Some("attachment; filename=\"a.pdf\"")
    /// );
    /// ```
    pub fn content_disposition(&self) -> Option<String> {
        let Delivery::File {
            filename, inline, ..
        } = self
        else {
            return None;
        };

        let disposition = if *inline { "inline" } else { "attachment" };
        if filename.is_empty() {
            return Some(disposition.to_string());
        }

        let fallback: String = filename
            .chars()
            .map(|c| {
                if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if fallback == *filename {
            Some(format!("{disposition}; filename=\"{fallback}\""))
        } else {
            Some(format!(
                "{disposition}; filename=\"{fallback}\"; filename*=UTF-8''{}",
                urlencoding::encode(filename)
            ))
        }
    }
}
