use std::fs::File;
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run, RunFonts};

use super::{render_error, DocumentRenderer, OutputFormat, RenderRequest};
use crate::errors::AppError;

/// Body text size in half-points (12 pt)
pub const BODY_FONT_SIZE: usize = 24;

/// Writes a Word document with one paragraph per line, set in the language font
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxRenderer;

impl DocxRenderer {
    fn run_fonts(family: &str) -> RunFonts {
        RunFonts::new()
            .ascii(family)
            .hi_ansi(family)
            .east_asia(family)
            .cs(family)
    }

    pub fn build(request: &RenderRequest<'_>) -> Docx {
        request.text.split('\n').fold(Docx::new(), |docx, line| {
            let run = Run::new()
                .add_text(line)
                .size(BODY_FONT_SIZE)
                .fonts(Self::run_fonts(request.font.family));
            docx.add_paragraph(Paragraph::new().add_run(run))
        })
    }
}

impl DocumentRenderer for DocxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn render(&self, request: &RenderRequest<'_>, path: &Path) -> Result<(), AppError> {
        let file = File::create(path).map_err(|e| render_error(path, e))?;
        Self::build(request)
            .build()
            .pack(file)
            .map_err(|e| render_error(path, e))
    }
}
