//! Structured rich text as delivered by the content source.
//!
//! A rich-text field is an ordered sequence of typed nodes. Text-bearing nodes
//! carry a plain `text` run plus formatting `spans` addressed by character
//! offsets into that run. Rendering to markup lives in the generator; this
//! module only models the data and extracts plain text.

use serde::{Deserialize, Serialize};

/// An ordered sequence of rich-text nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(Vec<RichTextNode>);

impl RichText {
    /// Create rich text from a list of nodes.
    #[must_use]
    pub fn new(nodes: Vec<RichTextNode>) -> Self {
        Self(nodes)
    }

    /// Rich text holding a single paragraph.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self(vec![RichTextNode::Paragraph(TextBlock::plain(text))])
    }

    /// All nodes in source order.
    #[must_use]
    pub fn nodes(&self) -> &[RichTextNode] {
        &self.0
    }

    /// Whether the field holds no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first node, if any.
    #[must_use]
    pub fn first(&self) -> Option<&RichTextNode> {
        self.0.first()
    }

    /// Text run of the first node.
    ///
    /// Returns `None` when the field is empty or the first node carries no text
    /// (an image or embed).
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.first().and_then(RichTextNode::text)
    }

    /// Plain text of every text-bearing node, joined by a single space.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.0
            .iter()
            .filter_map(RichTextNode::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Vec<RichTextNode>> for RichText {
    fn from(nodes: Vec<RichTextNode>) -> Self {
        Self(nodes)
    }
}

/// A single rich-text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RichTextNode {
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    Heading4(TextBlock),
    Heading5(TextBlock),
    Heading6(TextBlock),
    Paragraph(TextBlock),
    Preformatted(TextBlock),
    ListItem(TextBlock),
    OListItem(TextBlock),
    Image(ImageBlock),
    Embed(EmbedBlock),
    /// Node types this model does not know about.
    #[serde(other)]
    Unknown,
}

impl RichTextNode {
    /// The text block of a text-bearing node.
    #[must_use]
    pub fn block(&self) -> Option<&TextBlock> {
        match self {
            Self::Heading1(b)
            | Self::Heading2(b)
            | Self::Heading3(b)
            | Self::Heading4(b)
            | Self::Heading5(b)
            | Self::Heading6(b)
            | Self::Paragraph(b)
            | Self::Preformatted(b)
            | Self::ListItem(b)
            | Self::OListItem(b) => Some(b),
            Self::Image(_) | Self::Embed(_) | Self::Unknown => None,
        }
    }

    /// Plain text of the node.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.block().map(|b| b.text.as_str())
    }

    /// Formatting spans of the node; empty for non-text nodes.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        self.block().map(|b| b.spans.as_slice()).unwrap_or_default()
    }
}

/// Text run with formatting spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub spans: Vec<Span>,
}

impl TextBlock {
    /// Unformatted text.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Add a span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }
}

/// Inline image node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub url: String,

    #[serde(default)]
    pub alt: Option<String>,
}

/// Embedded media node (oEmbed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedBlock {
    #[serde(default)]
    pub oembed: Option<OEmbed>,
}

/// The oEmbed payload of an embed node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OEmbed {
    #[serde(default)]
    pub html: Option<String>,

    #[serde(default)]
    pub embed_url: Option<String>,
}

/// Formatting applied to a character range of a text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset, in characters.
    pub start: usize,

    /// Exclusive end offset, in characters.
    pub end: usize,

    #[serde(rename = "type")]
    pub kind: SpanKind,

    #[serde(default)]
    pub data: Option<SpanData>,
}

impl Span {
    /// A hyperlink span pointing at `url`.
    #[must_use]
    pub fn hyperlink(start: usize, end: usize, url: impl Into<String>) -> Self {
        Self {
            start,
            end,
            kind: SpanKind::Hyperlink,
            data: Some(SpanData {
                url: Some(url.into()),
                ..SpanData::default()
            }),
        }
    }

    /// A span without payload (strong, em).
    #[must_use]
    pub fn styled(start: usize, end: usize, kind: SpanKind) -> Self {
        Self {
            start,
            end,
            kind,
            data: None,
        }
    }

    /// Target URL of the span, if it carries one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.url.as_deref())
    }
}

/// Kind of formatting span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Strong,
    Em,
    Hyperlink,
    Label,
    #[serde(other)]
    Other,
}

/// Payload of a span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanData {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub link_type: Option<String>,

    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub label: Option<String>,
}
