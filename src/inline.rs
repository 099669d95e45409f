//! Inline tokenizer.
//!
//! Splits the text of a block into typed [`InlineSpan`]s. Tokenizing runs a
//! fixed sequence of passes over the span list: bold (`**`), italic (`_`),
//! code (`` ` ``), images (`![alt](url)`) and finally links (`[text](url)`).
//! Every pass only looks at [`InlineSpan::Plain`] spans, so the order matters:
//! bold has to run before italic, otherwise `_` splitting would tear apart
//! text that still contains `**` markers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::MarkdownError;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Inline text span with a single style or meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl InlineSpan {
    fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }
}

/// Delimited span kinds, in the order they are tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Bold,
    Italic,
    Code,
}

impl Delimiter {
    const PASSES: [Delimiter; 3] = [Delimiter::Bold, Delimiter::Italic, Delimiter::Code];

    fn as_str(self) -> &'static str {
        match self {
            Delimiter::Bold => "**",
            Delimiter::Italic => "_",
            Delimiter::Code => "`",
        }
    }

    fn span(self, text: &str) -> InlineSpan {
        match self {
            Delimiter::Bold => InlineSpan::Bold(text.to_string()),
            Delimiter::Italic => InlineSpan::Italic(text.to_string()),
            Delimiter::Code => InlineSpan::Code(text.to_string()),
        }
    }
}

/// Tokenize inline markdown into spans.
///
/// Fails with [`MarkdownError::MalformedInlineSyntax`] when a `**`, `_` or
/// `` ` `` delimiter is left unterminated. Malformed links and images are not
/// errors; they stay plain text.
///
/// Delimiters at the very start or end of `text` produce empty
/// [`InlineSpan::Plain`] spans at the boundaries:
///
/// ```
/// use mdsite::{InlineSpan, tokenize};
///
/// let spans = tokenize("a `b` c").unwrap();
/// assert_eq!(
///     spans,
///     vec![
///         InlineSpan::Plain("a ".into()),
///         InlineSpan::Code("b".into()),
///         InlineSpan::Plain(" c".into()),
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Result<Vec<InlineSpan>, MarkdownError> {
    let mut spans = vec![InlineSpan::plain(text)];
    for delimiter in Delimiter::PASSES {
        spans = split_delimited(spans, delimiter)?;
    }
    spans = split_images(spans);
    spans = split_links(spans);
    Ok(spans)
}

fn split_delimited(
    spans: Vec<InlineSpan>,
    delimiter: Delimiter,
) -> Result<Vec<InlineSpan>, MarkdownError> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let InlineSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let parts: Vec<&str> = text.split(delimiter.as_str()).collect();
        // An even number of parts means an odd number of delimiters
        if parts.len() % 2 == 0 {
            return Err(MarkdownError::MalformedInlineSyntax {
                delimiter: delimiter.as_str(),
                text,
            });
        }

        for (index, part) in parts.into_iter().enumerate() {
            if index % 2 == 0 {
                out.push(InlineSpan::plain(part));
            } else {
                out.push(delimiter.span(part));
            }
        }
    }

    Ok(out)
}

fn split_images(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    split_matches(spans, &IMAGE_RE, |_, _| true, |alt, url| InlineSpan::Image {
        alt: alt.to_string(),
        url: url.to_string(),
    })
}

fn split_links(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    split_matches(
        spans,
        &LINK_RE,
        |text, start| !text[..start].ends_with('!'),
        |text, url| InlineSpan::Link {
            text: text.to_string(),
            url: url.to_string(),
        },
    )
}

/// Replace every accepted match of `re` in plain spans with the span built by
/// `make`. The text between matches becomes plain spans, except empty pieces.
fn split_matches(
    spans: Vec<InlineSpan>,
    re: &Regex,
    accept: impl Fn(&str, usize) -> bool,
    make: impl Fn(&str, &str) -> InlineSpan,
) -> Vec<InlineSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let InlineSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut matched = false;
        let mut last = 0;
        for caps in re.captures_iter(&text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if !accept(&text, whole.start()) {
                continue;
            }
            matched = true;

            if whole.start() > last {
                out.push(InlineSpan::plain(&text[last..whole.start()]));
            }
            out.push(make(&caps[1], &caps[2]));
            last = whole.end();
        }

        if !matched {
            out.push(InlineSpan::Plain(text));
        } else if last < text.len() {
            out.push(InlineSpan::plain(&text[last..]));
        }
    }

    out
}
