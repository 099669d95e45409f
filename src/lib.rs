mod block;
mod config;
mod error;
mod html;
mod inline;
mod page;
mod render;
mod site;

pub use block::{BlockType, classify, segment};
pub use config::Config;
pub use error::{ConfigError, MarkdownError, SiteError};
pub use html::HtmlNode;
pub use inline::{InlineSpan, tokenize};
pub use page::{Template, extract_title, generate_page, read_markdown};
pub use render::{block_to_html_node, markdown_to_html_node, span_to_html_node};
pub use site::{BuildSummary, build, copy_static, generate_pages_recursive};

/// Convert a markdown document into its HTML node tree.
pub fn convert(markdown: &str) -> Result<HtmlNode, MarkdownError> {
    markdown_to_html_node(markdown)
}

/// Convert a markdown document straight to markup.
///
/// ```
/// assert_eq!(
///     mdsite::markdown_to_html("# Title\n\nHello **world**").unwrap(),
///     "<div><h1>Title</h1><p>Hello <b>world</b></p></div>"
/// );
/// ```
pub fn markdown_to_html(markdown: &str) -> Result<String, MarkdownError> {
    convert(markdown)?.to_html()
}
