//! Single page generation: title extraction and template substitution.

use std::fs;
use std::path::Path;

use crate::error::{MarkdownError, SiteError};
use crate::render::markdown_to_html_node;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Extract the page title from the first line, which must be a `#` heading.
///
/// ```
/// assert_eq!(mdsite::extract_title("# Hello  \n\nbody").unwrap(), "Hello");
/// assert!(mdsite::extract_title("body first\n# Late").is_err());
/// ```
pub fn extract_title(markdown: &str) -> Result<String, MarkdownError> {
    let first_line = markdown.split('\n').next().unwrap_or_default();
    if !first_line.starts_with('#') {
        return Err(MarkdownError::MissingTitle);
    }
    Ok(first_line.trim_start_matches('#').trim().to_string())
}

/// Read a markdown file, normalizing `\r\n` line endings to `\n`.
pub fn read_markdown(path: &Path) -> Result<String, SiteError> {
    let markdown = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
    Ok(markdown.replace("\r\n", "\n"))
}

/// Page template with `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let source = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        Ok(Self::new(source))
    }

    /// Fill in the placeholders and point root-relative links at `base_path`.
    pub fn render(&self, title: &str, content: &str, base_path: &str) -> String {
        self.source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content)
            .replace("href=\"/", &format!("href=\"{base_path}"))
            .replace("src=\"/", &format!("src=\"{base_path}"))
    }
}

/// Render one markdown file through `template` into `dest`.
///
/// Missing parent directories of `dest` are created. Nothing is written when
/// the markdown fails to convert.
pub fn generate_page(
    from: &Path,
    template: &Template,
    dest: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    tracing::info!(from = %from.display(), dest = %dest.display(), "Generating page");

    let markdown = read_markdown(from)?;
    let to_markdown_error = |source: MarkdownError| SiteError::Markdown {
        path: from.to_path_buf(),
        source,
    };

    let content = markdown_to_html_node(&markdown)
        .and_then(|node| node.to_html())
        .map_err(to_markdown_error)?;
    let title = extract_title(&markdown).map_err(to_markdown_error)?;

    let html = template.render(&title, &content, base_path);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(dest, html).map_err(|e| SiteError::io(dest, e))
}
