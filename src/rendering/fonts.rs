use std::path::{Path, PathBuf};

// @module: Font lookup for rendered output

/// Language code, font family, font file
const FONT_TABLE: &[(&str, &str, &str)] = &[
    ("hi", "Noto Sans Devanagari", "NotoSansDevanagari-Regular.ttf"),
    ("es", "Noto Sans", "NotoSans-Regular.ttf"),
    ("de", "Noto Sans", "NotoSans-Regular.ttf"),
];

const DEFAULT_FAMILY: &str = "Noto Sans";
const DEFAULT_FILE: &str = "NotoSans-Regular.ttf";

/// Font selected for one output language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontChoice {
    pub family: &'static str,
    pub path: PathBuf,
}

impl FontChoice {
    /// Whether the font file is present on disk
    pub fn is_available(&self) -> bool {
        self.path.is_file()
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_FILE)
    }
}

/// Maps language codes to fonts under a fonts directory
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts_dir: PathBuf,
}

impl FontRegistry {
    pub fn new<P: AsRef<Path>>(fonts_dir: P) -> Self {
        Self {
            fonts_dir: fonts_dir.as_ref().to_path_buf(),
        }
    }

    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }

    /// Font for a language, Noto Sans when the language has no entry
    pub fn lookup(&self, language: &str) -> FontChoice {
        let language = language.trim().to_lowercase();
        let (family, file) = FONT_TABLE
            .iter()
            .find(|(code, _, _)| *code == language)
            .map_or((DEFAULT_FAMILY, DEFAULT_FILE), |(_, family, file)| (*family, *file));

        FontChoice {
            family,
            path: self.fonts_dir.join(file),
        }
    }
}
