//! Block segmentation and classification.

use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6} ").unwrap());

static IMAGE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!\[.*\]\(.*\)$").unwrap());

const FENCE: &str = "```";

/// Block-level element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Image,
}

/// Split a markdown document into blocks separated by blank lines.
///
/// Every line is trimmed and empty lines are dropped, so the returned blocks
/// never contain blank lines or surrounding whitespace.
pub fn segment(markdown: &str) -> Vec<String> {
    markdown
        .split("\n\n")
        .map(|chunk| {
            chunk
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a segmented block.
///
/// Rules are tried in order and the first match wins: heading, code fence,
/// quote, unordered list, ordered list, single-line image, paragraph.
pub fn classify(block: &str) -> BlockType {
    if HEADING_RE.is_match(block) {
        return BlockType::Heading;
    }

    // Opening and closing fences must not share backticks
    if block.len() >= 2 * FENCE.len() && block.starts_with(FENCE) && block.ends_with(FENCE) {
        return BlockType::Code;
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if lines.iter().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    if is_ordered_list(&lines) {
        return BlockType::OrderedList;
    }

    if let [line] = lines.as_slice() {
        if IMAGE_LINE_RE.is_match(line.trim()) {
            return BlockType::Image;
        }
    }

    BlockType::Paragraph
}

/// Line `i` (1-based) must start with `"{i}. "`, with no gaps.
fn is_ordered_list(lines: &[&str]) -> bool {
    lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
}
