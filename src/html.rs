//! HTML node tree and serialization.

use crate::error::MarkdownError;

/// Tags rendered as a bare opening tag, without content or closing tag.
const VOID_TAGS: &[&str] = &["img"];

/// A node of the rendered HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    /// Element holding text directly. A `None` tag emits the value as-is.
    Leaf {
        tag: Option<String>,
        value: String,
        /// Attributes in insertion order.
        attributes: Vec<(String, String)>,
    },
    /// Element holding child nodes. `children: None` is an absent sequence,
    /// which is an error; an empty sequence is valid.
    Parent {
        tag: String,
        children: Option<Vec<HtmlNode>>,
    },
}

impl HtmlNode {
    /// Untagged text.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Leaf {
            tag: None,
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn leaf_with_attributes<K, V>(
        tag: impl Into<String>,
        value: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self::Parent {
            tag: tag.into(),
            children: Some(children),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Leaf { tag, .. } => tag.as_deref(),
            Self::Parent { tag, .. } => Some(tag),
        }
    }

    /// Serialize the tree to markup.
    ///
    /// Content and attribute values are written verbatim, without escaping.
    pub fn to_html(&self) -> Result<String, MarkdownError> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<(), MarkdownError> {
        match self {
            Self::Leaf {
                tag,
                value,
                attributes,
            } => write_leaf(tag.as_deref(), value, attributes, out),
            Self::Parent { tag, children } => {
                if tag.is_empty() {
                    return Err(MarkdownError::MissingTag);
                }
                let Some(children) = children else {
                    return Err(MarkdownError::MissingChildren { tag: tag.clone() });
                };

                out.push('<');
                out.push_str(tag);
                out.push('>');
                for child in children {
                    child.write_html(out)?;
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                Ok(())
            }
        }
    }
}

fn write_leaf(
    tag: Option<&str>,
    value: &str,
    attributes: &[(String, String)],
    out: &mut String,
) -> Result<(), MarkdownError> {
    if let Some(tag) = tag.filter(|tag| VOID_TAGS.contains(tag)) {
        out.push('<');
        out.push_str(tag);
        write_attributes(attributes, out);
        out.push('>');
        return Ok(());
    }

    if value.is_empty() {
        return Err(MarkdownError::EmptyLeafValue {
            tag: tag.map(str::to_string),
        });
    }

    let Some(tag) = tag else {
        out.push_str(value);
        return Ok(());
    };

    out.push('<');
    out.push_str(tag);
    write_attributes(attributes, out);
    out.push('>');
    out.push_str(value);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    Ok(())
}

fn write_attributes(attributes: &[(String, String)], out: &mut String) {
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}
