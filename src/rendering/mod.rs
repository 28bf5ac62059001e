/*!
 * Output rendering.
 *
 * Renderers consume the final translated text of one language and write one
 * artifact each: plain text, a standalone XHTML book page, a Word document
 * and an EPUB book. Further formats plug in through [`DocumentRenderer`].
 *
 * - `fonts`: Language to font lookup
 * - `layout`: Title, sections, XHTML escaping and stylesheet helpers
 * - `docx`: Word document renderer
 * - `epub`: EPUB book renderer
 */

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::file_utils::FileManager;

pub use self::docx::DocxRenderer;
pub use self::epub::EpubRenderer;
pub use self::fonts::{FontChoice, FontRegistry};

pub mod docx;
pub mod epub;
pub mod fonts;
pub mod layout;

/// Artifact formats, named by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Docx,
    Epub,
    Text,
    Xhtml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Epub => "epub",
            Self::Text => "txt",
            Self::Xhtml => "xhtml",
        }
    }

    /// `{output_dir}/{lang}_output.{ext}`
    pub fn output_path<P: AsRef<Path>>(&self, output_dir: P, language: &str) -> PathBuf {
        FileManager::generate_output_path(output_dir, language, self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Everything a renderer needs for one language
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    /// Final NFC-normalized text
    pub text: &'a str,
    pub language: &'a str,
    pub language_name: &'a str,
    pub font: &'a FontChoice,
    /// Name of the backend that produced the last chunk
    pub backend: &'a str,
}

/// Writes one artifact format
pub trait DocumentRenderer: Send + Sync {
    fn format(&self) -> OutputFormat;

    /// Write the artifact for `request` to `path`
    fn render(&self, request: &RenderRequest<'_>, path: &Path) -> Result<(), AppError>;
}

fn write_artifact(path: &Path, content: &str) -> Result<(), AppError> {
    FileManager::write_to_file(path, content)
        .map_err(|e| render_error(path, e))
}

pub(crate) fn render_error(path: &Path, error: impl fmt::Display) -> AppError {
    AppError::Render(format!("{}: {}", path.display(), error))
}

/// Writes the translated text as UTF-8
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(&self, request: &RenderRequest<'_>, path: &Path) -> Result<(), AppError> {
        write_artifact(path, request.text)
    }
}

/// Writes a standalone XHTML book page: title, subtitle, then one section per chapter
#[derive(Debug, Default, Clone, Copy)]
pub struct XhtmlRenderer;

impl XhtmlRenderer {
    pub fn build_page(request: &RenderRequest<'_>) -> String {
        let (title, body) = layout::extract_title_and_body(request.text);

        let head = format!(
            "<meta name=\"generator\" content=\"yadtwai ({})\" />\n<style>\n{}</style>\n",
            layout::escape_xhtml(request.backend),
            layout::stylesheet(request.font.family)
        );

        let mut content = format!("<h1>{}</h1>\n", layout::escape_xhtml(&title));
        content.push_str(&format!(
            "<p class=\"subtitle\">{}</p>\n",
            layout::escape_xhtml(&layout::subtitle(request.language_name))
        ));
        for section in layout::split_sections(&body) {
            content.push_str(&layout::section_html(&section));
        }

        layout::xhtml_document(request.language, &title, &head, &content)
    }
}

impl DocumentRenderer for XhtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xhtml
    }

    fn render(&self, request: &RenderRequest<'_>, path: &Path) -> Result<(), AppError> {
        write_artifact(path, &Self::build_page(request))
    }
}

/// The renderers shipped with the crate
pub fn default_renderers() -> Vec<Box<dyn DocumentRenderer>> {
    vec![
        Box::new(PlainTextRenderer),
        Box::new(XhtmlRenderer),
        Box::new(DocxRenderer),
        Box::new(EpubRenderer),
    ]
}
