//! File Upload Encoding
//!
//! Builds the `multipart/form-data` body used by file upload endpoints.

use crate::error::{ChatworkError, Result};
use reqwest::multipart::{Form, Part};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Name of the text part carrying the message
pub const MESSAGE_FIELD: &str = "message";

/// Name of the part carrying the file contents
pub const FILE_FIELD: &str = "file";

/// Build the upload form: an HTML-escaped `message` part followed by a `file`
/// part holding everything read from `file`.
///
/// The reader is drained once, front to back.
pub async fn upload_form<R>(message: &str, file_name: &str, mut file: R) -> Result<Form>
where
    R: AsyncRead + Unpin,
{
    let mut content = Vec::new();
    file.read_to_end(&mut content).await?;

    tracing::debug!(file_name, size = content.len(), "encoding upload");

    let file_part = Part::bytes(content)
        .file_name(file_name.to_string())
        .mime_str("application/octet-stream")
        .map_err(|e| ChatworkError::InvalidRequest(format!("Failed to create file part: {}", e)))?;

    Ok(Form::new()
        .text(MESSAGE_FIELD, escape_html(message))
        .part(FILE_FIELD, file_part))
}

/// Escape the five characters that are special in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
