/*!
 * Chapter splitting.
 *
 * A document is cut into chunks at lines that open a new chapter. Chunks are
 * borrowed, contiguous slices of the input, so joining them back with `'\n'`
 * reproduces the input byte for byte.
 */

/// Prefixes (lowercase) that mark the first line of a chapter
pub const CHAPTER_MARKERS: [&str; 3] = ["chapter ", "chap ", "ch "];

/// Check whether a single line opens a new chapter
pub fn is_chapter_marker(line: &str) -> bool {
    let normalized = line.trim().to_ascii_lowercase();
    CHAPTER_MARKERS.iter().any(|marker| normalized.starts_with(marker))
}

/// One unit of translation: a contiguous run of lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Zero-based position in the document
    pub index: usize,
    /// The chunk's lines, without the newline that separates it from the next chunk
    pub text: &'a str,
}

/// A raw input document
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    text: &'a str,
}

impl<'a> Document<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// The raw text
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Lazily split the document; every call starts from the beginning
    pub fn chunks(&self) -> Chapters<'a> {
        Chapters::new(self.text)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Iterator over the chunks of a document
#[derive(Debug, Clone)]
pub struct Chapters<'a> {
    text: &'a str,
    /// Byte offset where the next chunk starts
    position: usize,
    index: usize,
    finished: bool,
}

impl<'a> Chapters<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            index: 0,
            finished: text.is_empty(),
        }
    }
}

impl<'a> Iterator for Chapters<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        if self.finished {
            return None;
        }

        let start = self.position;
        let rest = &self.text[start..];

        // The first line always belongs to this chunk, marker or not.
        let mut line_start = match rest.find('\n') {
            Some(newline) => newline + 1,
            None => rest.len() + 1,
        };

        let mut end = rest.len();
        while line_start <= rest.len() {
            let line_end = rest[line_start..]
                .find('\n')
                .map_or(rest.len(), |offset| line_start + offset);

            if is_chapter_marker(&rest[line_start..line_end]) {
                end = line_start - 1;
                break;
            }
            line_start = line_end + 1;
        }

        let chunk = Chunk {
            index: self.index,
            text: &rest[..end],
        };

        self.index += 1;
        if end == rest.len() {
            self.finished = true;
        } else {
            self.position = start + end + 1;
        }

        Some(chunk)
    }
}

/// Convenience wrapper returning the chunk texts of `text`
pub fn split_into_chapters(text: &str) -> Vec<&str> {
    Document::new(text).chunks().map(|chunk| chunk.text).collect()
}
