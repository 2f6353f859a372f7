//! Gist bundle model.
//!
//! A bundle is an ordered set of named text files. The order is the order
//! the provider listed them in, and it decides how sibling stylesheets and
//! scripts are concatenated during preview assembly.

use serde::Deserialize;

use super::types::{File, file_extension};
use crate::error::PreviewError;

/// Extensions previewed as web pages with their sibling assets merged in.
pub const PREVIEWABLE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Extensions of sibling stylesheets.
pub const STYLESHEET_EXTENSIONS: &[&str] = &["css"];

/// Extensions of sibling classic scripts.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "javascript"];

/// Extension → language badge shown on source listings.
pub const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("jsx", "javascript"),
    ("mjs", "javascript"),
    ("cjs", "javascript"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("py", "python"),
    ("rb", "ruby"),
    ("java", "java"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("cs", "csharp"),
    ("go", "go"),
    ("rs", "rust"),
    ("php", "php"),
    ("swift", "swift"),
    ("kt", "kotlin"),
    ("scala", "scala"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("zsh", "bash"),
    ("sql", "sql"),
    ("json", "json"),
    ("xml", "xml"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("css", "css"),
    ("scss", "scss"),
    ("less", "less"),
    ("html", "html"),
    ("htm", "html"),
    ("md", "markdown"),
    ("markdown", "markdown"),
];

/// Language for a lowercased extension, `plaintext` when unknown.
pub fn language_for_extension(ext: &str) -> &'static str {
    LANGUAGE_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map_or("plaintext", |(_, lang)| *lang)
}

/// Whether `filename` is previewed as a web page.
pub fn is_previewable(filename: &str) -> bool {
    PREVIEWABLE_EXTENSIONS.contains(&file_extension(filename).as_str())
}

/// Short badge label for a file: its uppercased extension, or `FILE`.
pub fn display_type(filename: &str) -> String {
    let ext = file_extension(filename);
    if ext.is_empty() {
        "FILE".to_string()
    } else {
        ext.to_uppercase()
    }
}

/// An ordered set of named files plus provider metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
    pub id: String,
    pub description: Option<String>,
    /// Owner login, when the provider reports one.
    pub owner: Option<String>,
    pub files: Vec<File>,
}

#[derive(Deserialize)]
struct GistPayload {
    #[serde(default)]
    id: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    owner: Option<GistOwner>,
    files: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct GistOwner {
    login: String,
}

#[derive(Deserialize)]
struct GistFilePayload {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl Bundle {
    pub fn new(id: impl Into<String>, files: Vec<File>) -> Self {
        Self {
            id: id.into(),
            files,
            ..Self::default()
        }
    }

    /// Decode a gist payload as returned by the GitHub gists API
    /// (`{id, description, owner: {login}, files: {name: {filename, content, …}}}`).
    ///
    /// Only `filename` and `content` of each file are used; file order follows
    /// the payload.
    pub fn from_gist_json(json: &str) -> Result<Self, PreviewError> {
        let payload: GistPayload = serde_json::from_str(json)?;
        let mut files = Vec::with_capacity(payload.files.len());
        for (key, value) in payload.files {
            let entry: GistFilePayload = serde_json::from_value(value)?;
            let filename = entry.filename.unwrap_or(key);
            let Some(content) = entry.content else {
                return Err(PreviewError::MissingContent { filename });
            };
            files.push(File::new(filename, content));
        }
        crate::debug_info!(
            "ASSEMBLY",
            "decoded gist {} with {} files",
            payload.id,
            files.len()
        );
        Ok(Self {
            id: payload.id,
            description: payload.description,
            owner: payload.owner.map(|o| o.login),
            files,
        })
    }

    /// File by exact name.
    pub fn file(&self, filename: &str) -> Option<&File> {
        self.files.iter().find(|f| f.filename == filename)
    }

    fn with_extension(&self, extensions: &'static [&'static str]) -> impl Iterator<Item = &File> {
        self.files
            .iter()
            .filter(move |f| extensions.contains(&f.extension().as_str()))
    }

    /// Sibling stylesheets in bundle order.
    pub fn stylesheets(&self) -> impl Iterator<Item = &File> {
        self.with_extension(STYLESHEET_EXTENSIONS)
    }

    /// Sibling scripts in bundle order.
    pub fn scripts(&self) -> impl Iterator<Item = &File> {
        self.with_extension(SCRIPT_EXTENSIONS)
    }

    /// Files previewed as web pages, in bundle order.
    pub fn previewable_files(&self) -> impl Iterator<Item = &File> {
        self.files.iter().filter(|f| is_previewable(&f.filename))
    }

    /// The file a preview opens on by default: the first previewable file,
    /// else the first file.
    pub fn default_file(&self) -> Option<&File> {
        self.previewable_files().next().or_else(|| self.files.first())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
