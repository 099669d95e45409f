//! Error types for markdown conversion and site generation.

use std::path::PathBuf;

/// Error returned when a markdown document cannot be converted to HTML.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkdownError {
    /// An inline delimiter was opened but never closed.
    #[error("Invalid markdown syntax: unterminated `{delimiter}` in {text:?}")]
    MalformedInlineSyntax {
        delimiter: &'static str,
        text: String,
    },

    /// A block classified as an image does not match the strict image syntax.
    #[error("Invalid markdown image syntax: {0:?}")]
    InvalidImageSyntax(String),

    /// A non-void leaf node has no content.
    #[error("Leaf node <{}> has an empty value", .tag.as_deref().unwrap_or("text"))]
    EmptyLeafValue { tag: Option<String> },

    /// A parent node has an empty tag.
    #[error("Parent node is missing its tag")]
    MissingTag,

    /// A parent node has no children sequence at all.
    #[error("Parent node <{tag}> is missing its children")]
    MissingChildren { tag: String },

    /// A block rendered as a heading does not start with one to six `#`.
    #[error("Invalid heading: {0:?}")]
    InvalidHeading(String),

    /// The first line of a page is not a heading, so it has no title.
    #[error("Missing title: the first line must be a `#` heading")]
    MissingTitle,
}

/// Error returned when the site configuration cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Error returned when generating pages or copying assets fails.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to convert {}: {source}", .path.display())]
    Markdown {
        path: PathBuf,
        #[source]
        source: MarkdownError,
    },

    /// Cleaning the output directory would delete site sources.
    #[error(
        "Refusing to clean {}: it contains {}",
        .output_dir.display(),
        .source_path.display()
    )]
    UnsafeClean {
        output_dir: PathBuf,
        source_path: PathBuf,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

