//! Block rendering and document assembly.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::{BlockType, classify, segment};
use crate::error::MarkdownError;
use crate::html::HtmlNode;
use crate::inline::{InlineSpan, tokenize};

static IMAGE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[([^\[\]]*)\]\(([^\(\)]*)\)$").unwrap());

const FENCE: &str = "```";

/// Convert a markdown document to a `div` holding one node per block.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode, MarkdownError> {
    let blocks = segment(markdown);
    let mut children = Vec::with_capacity(blocks.len());

    for block in &blocks {
        let block_type = classify(block);
        tracing::trace!(?block_type, "Rendering block");
        children.push(block_to_html_node(block, block_type)?);
    }

    Ok(HtmlNode::parent("div", children))
}

/// Render a single block that has already been classified as `block_type`.
pub fn block_to_html_node(block: &str, block_type: BlockType) -> Result<HtmlNode, MarkdownError> {
    match block_type {
        BlockType::Paragraph => paragraph(block),
        BlockType::Heading => heading(block),
        BlockType::Code => code(block),
        BlockType::Quote => quote(block),
        BlockType::UnorderedList => list(block, "ul", |line| line.get(2..).unwrap_or("")),
        BlockType::OrderedList => list(block, "ol", strip_ordered_marker),
        BlockType::Image => image(block),
    }
}

/// Map an inline span to its HTML leaf.
pub fn span_to_html_node(span: &InlineSpan) -> HtmlNode {
    match span {
        InlineSpan::Plain(text) => HtmlNode::text(text.as_str()),
        InlineSpan::Bold(text) => HtmlNode::leaf("b", text.as_str()),
        InlineSpan::Italic(text) => HtmlNode::leaf("i", text.as_str()),
        InlineSpan::Code(text) => HtmlNode::leaf("code", text.as_str()),
        InlineSpan::Link { text, url } => {
            HtmlNode::leaf_with_attributes("a", text.as_str(), [("href", url.as_str())])
        }
        InlineSpan::Image { alt, url } => {
            HtmlNode::leaf_with_attributes("img", "", [("src", url.as_str()), ("alt", alt.as_str())])
        }
    }
}

/// Tokenize `text` and map the spans to leaves. Empty plain spans left at
/// delimiter boundaries carry no content and are skipped.
fn inline_children(text: &str) -> Result<Vec<HtmlNode>, MarkdownError> {
    Ok(tokenize(text)?
        .iter()
        .filter(|span| !matches!(span, InlineSpan::Plain(text) if text.is_empty()))
        .map(span_to_html_node)
        .collect())
}

fn paragraph(block: &str) -> Result<HtmlNode, MarkdownError> {
    let text = block.replace('\n', " ");
    Ok(HtmlNode::parent("p", inline_children(text.trim())?))
}

fn heading(block: &str) -> Result<HtmlNode, MarkdownError> {
    let rest = block.trim_start_matches('#');
    let level = block.len() - rest.len();
    if !(1..=6).contains(&level) || !rest.starts_with(char::is_whitespace) {
        return Err(MarkdownError::InvalidHeading(block.to_string()));
    }
    let text = rest.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(HtmlNode::parent(format!("h{level}"), inline_children(&text)?))
}

fn code(block: &str) -> Result<HtmlNode, MarkdownError> {
    let inner = block.strip_prefix(FENCE).unwrap_or(block);
    let inner = inner.strip_suffix(FENCE).unwrap_or(inner);
    let code = HtmlNode::parent("code", inline_children(inner)?);
    Ok(HtmlNode::parent("pre", vec![code]))
}

fn quote(block: &str) -> Result<HtmlNode, MarkdownError> {
    let text: String = block
        .split('\n')
        .map(|line| line.trim().trim_start_matches('>'))
        .collect();
    Ok(HtmlNode::parent("blockquote", inline_children(text.trim())?))
}

fn list(
    block: &str,
    tag: &str,
    strip_marker: impl Fn(&str) -> &str,
) -> Result<HtmlNode, MarkdownError> {
    let items = block
        .split('\n')
        .map(|line| Ok(HtmlNode::parent("li", inline_children(strip_marker(line))?)))
        .collect::<Result<Vec<_>, MarkdownError>>()?;
    Ok(HtmlNode::parent(tag, items))
}

fn strip_ordered_marker(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.strip_prefix(". ").unwrap_or(rest)
}

fn image(block: &str) -> Result<HtmlNode, MarkdownError> {
    let caps = IMAGE_BLOCK_RE
        .captures(block.trim())
        .ok_or_else(|| MarkdownError::InvalidImageSyntax(block.to_string()))?;
    Ok(HtmlNode::leaf_with_attributes(
        "img",
        "",
        [("src", &caps[2]), ("alt", &caps[1])],
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn to_html(markdown: &str) -> String {
        markdown_to_html_node(markdown).unwrap().to_html().unwrap()
    }

    #[test]
    fn title_and_paragraph() {
        assert_eq!(
            to_html("# Title\n\nHello **world**"),
            "<div><h1>Title</h1><p>Hello <b>world</b></p></div>"
        );
    }

    #[test]
    fn paragraphs() {
        let md = "
This is **bolded** paragraph
text in a p
tag here

This is another paragraph with _italic_ text and `code` here

";
        assert_eq!(
            to_html(md),
            "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p><p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
        );
    }

    #[test]
    fn headings() {
        assert_eq!(to_html("### Third  level"), "<div><h3>Third level</h3></div>");
        assert_eq!(
            to_html("###### _Six_"),
            "<div><h6><i>Six</i></h6></div>"
        );
    }

    #[test]
    fn heading_level_comes_from_leading_hashes() {
        for block in ["x y", "####### seven", "#nospace"] {
            assert_eq!(
                block_to_html_node(block, BlockType::Heading),
                Err(MarkdownError::InvalidHeading(block.into()))
            );
        }
        assert_eq!(
            block_to_html_node("## Two\nlines", BlockType::Heading)
                .unwrap()
                .to_html()
                .unwrap(),
            "<h2>Two lines</h2>"
        );
    }

    #[test]
    fn image_block_is_void() {
        assert_eq!(
            to_html("![cat](x.png)"),
            r#"<div><img src="x.png" alt="cat"></div>"#
        );
    }

    #[test]
    fn image_block_requires_strict_syntax() {
        let block = "![a](b) ![c](d)";
        assert_eq!(classify(block), BlockType::Image);
        assert_eq!(
            markdown_to_html_node(block),
            Err(MarkdownError::InvalidImageSyntax(block.into()))
        );
    }

    #[test]
    fn code_block() {
        assert_eq!(
            to_html("```\nlet x = 1;\n```"),
            "<div><pre><code>\nlet x = 1;\n</code></pre></div>"
        );
        assert_eq!(
            to_html("``` this is a code block ```"),
            "<div><pre><code> this is a code block </code></pre></div>"
        );
    }

    #[test]
    fn empty_code_block() {
        assert_eq!(to_html("``````"), "<div><pre><code></code></pre></div>");
    }

    #[test]
    fn quote_block() {
        assert_eq!(
            to_html("> All that is gold\n> does not _glitter_"),
            "<div><blockquote>All that is gold does not <i>glitter</i></blockquote></div>"
        );
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            to_html("- one\n- **two**\n- [three](/3)"),
            r#"<div><ul><li>one</li><li><b>two</b></li><li><a href="/3">three</a></li></ul></div>"#
        );
    }

    #[test]
    fn ordered_list() {
        let md = (1..=10)
            .map(|i| format!("{i}. item {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let items: String = (1..=10).map(|i| format!("<li>item {i}</li>")).collect();
        assert_eq!(to_html(&md), format!("<div><ol>{items}</ol></div>"));
    }

    #[test]
    fn ordered_list_gap_is_paragraph() {
        assert_eq!(to_html("1. a\n3. b"), "<div><p>1. a 3. b</p></div>");
    }

    #[test]
    fn inline_image_and_link() {
        assert_eq!(
            to_html("See ![logo](/img/logo.png) or [home](/)"),
            r#"<div><p>See <img src="/img/logo.png" alt="logo"> or <a href="/">home</a></p></div>"#
        );
    }

    #[test]
    fn empty_document() {
        assert_eq!(to_html(""), "<div></div>");
        assert_eq!(to_html("\n\n  \n"), "<div></div>");
    }

    #[test]
    fn malformed_inline_aborts_document() {
        assert!(matches!(
            markdown_to_html_node("# Fine\n\nbroken **bold"),
            Err(MarkdownError::MalformedInlineSyntax { delimiter: "**", .. })
        ));
    }

    #[test]
    fn empty_bold_fails_at_serialization() {
        let node = markdown_to_html_node("a **** b").unwrap();
        assert_eq!(
            node.to_html(),
            Err(MarkdownError::EmptyLeafValue {
                tag: Some("b".into())
            })
        );
    }

    #[test]
    fn serialization_is_stable() {
        let node = markdown_to_html_node("# T\n\n- a\n- b\n\n> q\n\n![i](u)").unwrap();
        assert_eq!(node.to_html().unwrap(), node.to_html().unwrap());
    }

    #[test]
    fn span_mapping() {
        assert_eq!(
            span_to_html_node(&InlineSpan::Plain("x".into())),
            HtmlNode::text("x")
        );
        assert_eq!(
            span_to_html_node(&InlineSpan::Link {
                text: "Google".into(),
                url: "https://google.com".into(),
            }),
            HtmlNode::leaf_with_attributes("a", "Google", [("href", "https://google.com")])
        );
        assert_eq!(
            span_to_html_node(&InlineSpan::Image {
                alt: "alt".into(),
                url: "u.png".into(),
            }),
            HtmlNode::leaf_with_attributes("img", "", [("src", "u.png"), ("alt", "alt")])
        );
    }
}
