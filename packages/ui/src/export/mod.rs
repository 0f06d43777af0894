//! # Document export
//!
//! Generated content is first parsed into a [`Document`] (title, metadata and
//! a flat list of blocks), then rendered by one of the pure renderers:
//!
//! - [`html::render_html`]: a standalone HTML page
//! - [`text::render_text`]: 80-column plain text
//! - [`pdf::render_pdf`]: a PDF 1.4 file laid out by [`pdf::layout`]
//!
//! [`export`] wraps the result in an [`ExportArtifact`] that the browser hands
//! to the user through [`download`].

pub mod document;
pub mod html;
pub mod pdf;
pub mod text;
mod wrap;

#[cfg(target_arch = "wasm32")]
mod download;
#[cfg(target_arch = "wasm32")]
pub use download::download;

pub use document::{Block, Document};
pub use pdf::PageSetup;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Html,
    Text,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Html, ExportFormat::Text];

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Html => "HTML",
            ExportFormat::Text => "Text",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
            ExportFormat::Text => "txt",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Html => "text/html;charset=utf-8",
            ExportFormat::Text => "text/plain;charset=utf-8",
        }
    }

    /// Download name derived from the document title, e.g.
    /// `mathematics-algebra.pdf`.
    pub fn file_name(&self, title: &str) -> String {
        let mut slug = String::new();
        for ch in title.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let slug = slug.trim_end_matches('-');
        let slug = if slug.is_empty() { "document" } else { slug };
        format!("{slug}.{}", self.extension())
    }
}

/// A rendered export ready to be saved.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub file_name: String,
}

pub fn export(doc: &Document, format: ExportFormat, setup: &PageSetup) -> ExportArtifact {
    let bytes = match format {
        ExportFormat::Pdf => pdf::render_pdf(doc, setup),
        ExportFormat::Html => html::render_html(doc).into_bytes(),
        ExportFormat::Text => text::render_text(doc).into_bytes(),
    };
    ExportArtifact {
        bytes,
        mime: format.mime(),
        file_name: format.file_name(&doc.title),
    }
}

/// Hand the artifact to the user: a browser download on the web, a file in
/// the downloads folder elsewhere. Returns where it went.
pub fn save(artifact: &ExportArtifact) -> Result<String, String> {
    #[cfg(target_arch = "wasm32")]
    {
        download(artifact).map(|()| artifact.file_name.clone())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let dir = dirs::download_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        let path = dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes).map_err(|e| e.to_string())?;
        Ok(path.display().to_string())
    }
}
