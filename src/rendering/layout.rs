/*!
 * Book layout helpers shared by the renderers.
 *
 * A translated document is laid out as a title page followed by sections.
 * The first non-blank line is the title; the rest is cut into sections at
 * chapter headings (English abbreviations or Hindi `अध्याय`).
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::translation::pipeline::normalize_nfc;

/// Title used when a document has no non-blank line
pub const UNTITLED: &str = "Untitled";

/// Heading given to a body without any recognizable chapter heading
pub const DEFAULT_SECTION_HEADING: &str = "Chapter 1";

/// Hindi ordinals first to tenth
const HINDI_ORDINALS: [&str; 10] = [
    "पहला", "दूसरा", "तीसरा", "चौथा", "पांचवां", "छठा", "सातवां", "आठवां", "नौवां", "दसवां",
];

static CHAPTER_HEADING: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?i)^(?:chapter\s+\d+|chap\s+\d+|ch\s+\d+|अध्याय\s+\d+|अध्याय\s+(?:{}))",
        HINDI_ORDINALS.join("|")
    );
    Regex::new(&pattern).unwrap()
});

/// One titled part of the book body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Empty for text that precedes the first heading
    pub heading: String,
    pub body: String,
}

/// Check whether a (trimmed) line is a chapter heading
pub fn is_chapter_heading(line: &str) -> bool {
    CHAPTER_HEADING.is_match(line.trim())
}

/// Split off the first non-blank line as the title
pub fn extract_title_and_body(text: &str) -> (String, String) {
    let mut title = None;
    let mut body = Vec::new();

    for line in text.split('\n') {
        if title.is_none() && !line.trim().is_empty() {
            title = Some(line.trim().to_string());
            continue;
        }
        body.push(line);
    }

    (title.unwrap_or_else(|| UNTITLED.to_string()), body.join("\n"))
}

/// Cut a body into sections at chapter headings
///
/// Lines are trimmed and NFC-normalized. Text before the first heading is
/// kept as a section with an empty heading when it has visible content.
pub fn split_sections(body: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut heading: Option<String> = None;
    let mut lines: Vec<String> = Vec::new();

    for line in body.split('\n') {
        let stripped = normalize_nfc(line.trim());
        if is_chapter_heading(&stripped) {
            match heading.take() {
                Some(previous) => sections.push(Section {
                    heading: previous,
                    body: lines.join("\n"),
                }),
                None if lines.iter().any(|l| !l.is_empty()) => sections.push(Section {
                    heading: String::new(),
                    body: lines.join("\n"),
                }),
                None => {}
            }
            heading = Some(stripped);
            lines.clear();
        } else {
            lines.push(stripped);
        }
    }

    match heading {
        Some(last) => sections.push(Section {
            heading: last,
            body: lines.join("\n"),
        }),
        None => {
            return vec![Section {
                heading: DEFAULT_SECTION_HEADING.to_string(),
                body: body.to_string(),
            }];
        }
    }

    sections
}

/// Escape text for XHTML content
pub fn escape_xhtml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// One `<p>` per line; empty lines become a non-breaking space
///
/// The space is a numeric reference: standalone XHTML has no `&nbsp;` entity.
pub fn paragraphs(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let safe = escape_xhtml(line);
            if safe.is_empty() {
                "<p>&#160;</p>".to_string()
            } else {
                format!("<p>{}</p>", safe)
            }
        })
        .collect()
}

/// `<section>` markup for one section, with an `<h2>` when it has a heading
pub fn section_html(section: &Section) -> String {
    let mut html = String::from("<section>\n");
    if !section.heading.is_empty() {
        html.push_str(&format!("<h2>{}</h2>\n", escape_xhtml(&section.heading)));
    }
    html.push_str(&paragraphs(&section.body));
    html.push_str("\n</section>\n");
    html
}

/// Wrap body markup into a complete XHTML document
///
/// `head_extra` is inserted verbatim into `<head>` after the title.
pub fn xhtml_document(language: &str, title: &str, head_extra: &str, body: &str) -> String {
    let language = escape_xhtml(language);
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <!DOCTYPE html>\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\" xml:lang=\"{0}\" lang=\"{0}\">\n\
         <head>\n<meta charset=\"utf-8\" />\n<title>{1}</title>\n{2}</head>\n\
         <body>\n{3}</body>\n</html>\n",
        language,
        escape_xhtml(title),
        head_extra,
        body
    )
}

/// Body stylesheet for a font family
pub fn stylesheet(font_family: &str) -> String {
    format!(
        "body {{\n    font-family: '{}';\n    white-space: pre-wrap;\n}}\n",
        font_family
    )
}

/// Subtitle shown under the title, e.g. "Translated – Spanish"
pub fn subtitle(language_name: &str) -> String {
    format!("Translated – {}", language_name)
}
