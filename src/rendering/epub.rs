use std::fs::File;
use std::path::Path;

use epub_builder::{EpubBuilder, EpubContent, EpubVersion, ReferenceType, ZipLibrary};
use log::debug;

use super::layout;
use super::{render_error, DocumentRenderer, OutputFormat, RenderRequest};
use crate::errors::AppError;

// @module: EPUB book renderer

/// Author recorded in the book metadata
pub const EPUB_AUTHOR: &str = "yadtwai";

/// Location of the book stylesheet relative to the content documents
const STYLESHEET_HREF: &str = "stylesheet.css";

const FONT_MIME_TYPE: &str = "application/x-font-ttf";

/// One content document of the book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpubChapter {
    pub file_name: String,
    pub title: String,
    pub page: String,
}

/// Packs the translated text as an EPUB 3 book: a title page and one
/// content document per chapter, with the language font embedded when present
#[derive(Debug, Default, Clone, Copy)]
pub struct EpubRenderer;

impl EpubRenderer {
    /// Stylesheet for the book, with an `@font-face` rule when the font is embedded
    pub fn book_stylesheet(request: &RenderRequest<'_>, embed_font: bool) -> String {
        let mut css = String::new();
        if embed_font {
            css.push_str(&format!(
                "@font-face {{\n    font-family: '{}';\n    src: url(fonts/{});\n}}\n",
                request.font.family,
                request.font.file_name()
            ));
        }
        css.push_str(&layout::stylesheet(request.font.family));
        css
    }

    /// Title page followed by one chapter document per section
    pub fn build_chapters(request: &RenderRequest<'_>) -> Vec<EpubChapter> {
        let (title, body) = layout::extract_title_and_body(request.text);
        let head = format!("<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\" />\n", STYLESHEET_HREF);

        let title_body = format!(
            "<h1>{}</h1>\n<p class=\"subtitle\">{}</p>\n",
            layout::escape_xhtml(&title),
            layout::escape_xhtml(&layout::subtitle(request.language_name))
        );
        let mut chapters = vec![EpubChapter {
            file_name: "title.xhtml".to_string(),
            title: title.clone(),
            page: layout::xhtml_document(request.language, &title, &head, &title_body),
        }];

        for (index, section) in layout::split_sections(&body).iter().enumerate() {
            let chapter_title = if section.heading.is_empty() {
                title.clone()
            } else {
                section.heading.clone()
            };
            chapters.push(EpubChapter {
                file_name: format!("chapter_{}.xhtml", index + 1),
                page: layout::xhtml_document(request.language, &chapter_title, &head, &layout::section_html(section)),
                title: chapter_title,
            });
        }

        chapters
    }
}

impl DocumentRenderer for EpubRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Epub
    }

    fn render(&self, request: &RenderRequest<'_>, path: &Path) -> Result<(), AppError> {
        let embed_font = request.font.is_available();
        if !embed_font {
            debug!("EPUB {}: no font file to embed", request.language);
        }

        let zip = ZipLibrary::new().map_err(|e| render_error(path, e))?;
        let mut builder = EpubBuilder::new(zip).map_err(|e| render_error(path, e))?;
        builder.epub_version(EpubVersion::V30);
        builder.metadata("title", layout::subtitle(request.language_name)).map_err(|e| render_error(path, e))?;
        builder.metadata("author", EPUB_AUTHOR).map_err(|e| render_error(path, e))?;
        builder.metadata("lang", request.language).map_err(|e| render_error(path, e))?;
        builder
            .stylesheet(Self::book_stylesheet(request, embed_font).as_bytes())
            .map_err(|e| render_error(path, e))?;

        if embed_font {
            let font = File::open(&request.font.path).map_err(|e| render_error(path, e))?;
            builder
                .add_resource(format!("fonts/{}", request.font.file_name()), font, FONT_MIME_TYPE)
                .map_err(|e| render_error(path, e))?;
        }

        for (index, chapter) in Self::build_chapters(request).into_iter().enumerate() {
            let reftype = if index == 0 { ReferenceType::TitlePage } else { ReferenceType::Text };
            debug!("EPUB {}: adding {}", request.language, chapter.file_name);
            builder
                .add_content(
                    EpubContent::new(chapter.file_name, chapter.page.as_bytes())
                        .title(chapter.title)
                        .reftype(reftype),
                )
                .map_err(|e| render_error(path, e))?;
        }

        let mut file = File::create(path).map_err(|e| render_error(path, e))?;
        builder.generate(&mut file).map_err(|e| render_error(path, e))?;
        Ok(())
    }
}
