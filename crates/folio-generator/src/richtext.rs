//! Rich text to HTML rendering.

use folio_core::{
    RichText, RichTextNode, Span, SpanKind,
    richtext::{EmbedBlock, ImageBlock},
};

/// Render a rich-text field to HTML.
///
/// Consecutive list items are grouped into a single `<ul>` or `<ol>`. Nodes of
/// unknown type are dropped.
#[must_use]
pub fn render(rich: &RichText) -> String {
    let mut out = String::new();
    let mut open_list: Option<&'static str> = None;

    for node in rich.nodes() {
        let list = match node {
            RichTextNode::ListItem(_) => Some("ul"),
            RichTextNode::OListItem(_) => Some("ol"),
            _ => None,
        };

        if open_list != list {
            if let Some(tag) = open_list {
                out.push_str(&format!("</{tag}>"));
            }
            if let Some(tag) = list {
                out.push_str(&format!("<{tag}>"));
            }
            open_list = list;
        }

        match node {
            RichTextNode::Heading1(b) => wrap(&mut out, "h1", &render_spans(&b.text, &b.spans)),
            RichTextNode::Heading2(b) => wrap(&mut out, "h2", &render_spans(&b.text, &b.spans)),
            RichTextNode::Heading3(b) => wrap(&mut out, "h3", &render_spans(&b.text, &b.spans)),
            RichTextNode::Heading4(b) => wrap(&mut out, "h4", &render_spans(&b.text, &b.spans)),
            RichTextNode::Heading5(b) => wrap(&mut out, "h5", &render_spans(&b.text, &b.spans)),
            RichTextNode::Heading6(b) => wrap(&mut out, "h6", &render_spans(&b.text, &b.spans)),
            RichTextNode::Paragraph(b) => wrap(&mut out, "p", &render_spans(&b.text, &b.spans)),
            RichTextNode::Preformatted(b) => {
                wrap(&mut out, "pre", &render_spans(&b.text, &b.spans));
            }
            RichTextNode::ListItem(b) | RichTextNode::OListItem(b) => {
                wrap(&mut out, "li", &render_spans(&b.text, &b.spans));
            }
            RichTextNode::Image(image) => out.push_str(&image_html(image)),
            RichTextNode::Embed(embed) => out.push_str(&embed_html(embed)),
            RichTextNode::Unknown => {}
        }
    }

    if let Some(tag) = open_list {
        out.push_str(&format!("</{tag}>"));
    }
    out
}

/// Render only the inline content of the first text node, without a wrapper.
///
/// Used where a field is shown inside an element that already provides
/// structure, such as a card title.
#[must_use]
pub fn render_inline(rich: &RichText) -> String {
    rich.first()
        .and_then(RichTextNode::block)
        .map(|b| render_spans(&b.text, &b.spans))
        .unwrap_or_default()
}

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}

fn wrap(out: &mut String, tag: &str, inner: &str) {
    out.push_str(&format!("<{tag}>{inner}</{tag}>"));
}

fn image_html(image: &ImageBlock) -> String {
    format!(
        r#"<p class="block-img"><img src="{}" alt="{}" /></p>"#,
        escape_html(&image.url),
        escape_html(image.alt.as_deref().unwrap_or_default())
    )
}

fn embed_html(embed: &EmbedBlock) -> String {
    let Some(oembed) = &embed.oembed else {
        return String::new();
    };
    // oEmbed markup comes from the content source and is emitted as is.
    format!(
        r#"<div data-oembed="{}">{}</div>"#,
        escape_html(oembed.embed_url.as_deref().unwrap_or_default()),
        oembed.html.as_deref().unwrap_or_default()
    )
}

/// Apply spans to a text run.
///
/// Offsets are character positions. Overlapping spans that are not properly
/// nested are closed and reopened so the output stays well formed.
fn render_spans(text: &str, spans: &[Span]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut spans: Vec<&Span> = spans
        .iter()
        .filter(|s| s.start < s.end && s.start < len)
        .collect();
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out = String::with_capacity(text.len());
    let mut open: Vec<&Span> = Vec::new();
    let mut next = 0;

    for pos in 0..=len {
        if open.iter().any(|s| s.end.min(len) == pos) {
            let mut survivors = Vec::new();
            while let Some(span) = open.pop() {
                out.push_str(close_tag(span));
                if span.end.min(len) != pos {
                    survivors.push(span);
                }
            }
            for span in survivors.into_iter().rev() {
                out.push_str(&open_tag(span));
                open.push(span);
            }
        }

        while next < spans.len() && spans[next].start == pos {
            out.push_str(&open_tag(spans[next]));
            open.push(spans[next]);
            next += 1;
        }

        if let Some(&c) = chars.get(pos) {
            if c == '\n' {
                out.push_str("<br />");
            } else {
                push_escaped(&mut out, c);
            }
        }
    }

    out
}

fn open_tag(span: &Span) -> String {
    match (span.kind, span.url()) {
        (SpanKind::Strong, _) => "<strong>".to_string(),
        (SpanKind::Em, _) => "<em>".to_string(),
        (SpanKind::Hyperlink, Some(url)) => format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
            escape_html(url)
        ),
        (SpanKind::Label, _) => {
            let label = span
                .data
                .as_ref()
                .and_then(|d| d.label.as_deref())
                .unwrap_or_default();
            format!(r#"<span class="{}">"#, escape_html(label))
        }
        (SpanKind::Hyperlink, None) | (SpanKind::Other, _) => "<span>".to_string(),
    }
}

fn close_tag(span: &Span) -> &'static str {
    match (span.kind, span.url()) {
        (SpanKind::Strong, _) => "</strong>",
        (SpanKind::Em, _) => "</em>",
        (SpanKind::Hyperlink, Some(_)) => "</a>",
        (SpanKind::Label, _) | (SpanKind::Hyperlink, None) | (SpanKind::Other, _) => "</span>",
    }
}

#[cfg(test)]
mod tests {
    use folio_core::richtext::{OEmbed, TextBlock};

    use super::*;

    fn para(block: TextBlock) -> RichText {
        RichText::new(vec![RichTextNode::Paragraph(block)])
    }

    #[test]
    fn test_render_headings_and_paragraphs() {
        let rich = RichText::new(vec![
            RichTextNode::Heading1(TextBlock::plain("Hello")),
            RichTextNode::Paragraph(TextBlock::plain("World")),
        ]);
        assert_eq!(render(&rich), "<h1>Hello</h1><p>World</p>");
    }

    #[test]
    fn test_render_escapes_text() {
        let rich = RichText::paragraph("Tom & Jerry <3");
        assert_eq!(render(&rich), "<p>Tom &amp; Jerry &lt;3</p>");
    }

    #[test]
    fn test_render_hyperlink_span() {
        let rich = para(
            TextBlock::plain("I work at Stikwood").with_span(Span::hyperlink(
                10,
                18,
                "https://stikwood.com",
            )),
        );
        assert_eq!(
            render(&rich),
            r#"<p>I work at <a href="https://stikwood.com" target="_blank" rel="noopener noreferrer">Stikwood</a></p>"#
        );
    }

    #[test]
    fn test_render_nested_spans() {
        let rich = para(
            TextBlock::plain("bold italic")
                .with_span(Span::styled(0, 11, SpanKind::Strong))
                .with_span(Span::styled(5, 11, SpanKind::Em)),
        );
        assert_eq!(
            render(&rich),
            "<p><strong>bold <em>italic</em></strong></p>"
        );
    }

    #[test]
    fn test_render_crossing_spans_stay_well_formed() {
        let rich = para(
            TextBlock::plain("abcd")
                .with_span(Span::styled(0, 2, SpanKind::Strong))
                .with_span(Span::styled(1, 4, SpanKind::Em)),
        );
        assert_eq!(
            render(&rich),
            "<p><strong>a<em>b</em></strong><em>cd</em></p>"
        );
    }

    #[test]
    fn test_render_multibyte_offsets() {
        let rich = para(
            TextBlock::plain("héllo wörld").with_span(Span::styled(6, 11, SpanKind::Strong)),
        );
        assert_eq!(render(&rich), "<p>héllo <strong>wörld</strong></p>");
    }

    #[test]
    fn test_render_span_past_end_is_clamped() {
        let rich = para(TextBlock::plain("abc").with_span(Span::styled(1, 40, SpanKind::Em)));
        assert_eq!(render(&rich), "<p>a<em>bc</em></p>");
    }

    #[test]
    fn test_render_groups_lists() {
        let rich = RichText::new(vec![
            RichTextNode::ListItem(TextBlock::plain("a")),
            RichTextNode::ListItem(TextBlock::plain("b")),
            RichTextNode::OListItem(TextBlock::plain("one")),
            RichTextNode::Paragraph(TextBlock::plain("end")),
        ]);
        assert_eq!(
            render(&rich),
            "<ul><li>a</li><li>b</li></ul><ol><li>one</li></ol><p>end</p>"
        );
    }

    #[test]
    fn test_render_line_breaks() {
        let rich = RichText::paragraph("line one\nline two");
        assert_eq!(render(&rich), "<p>line one<br />line two</p>");
    }

    #[test]
    fn test_render_image_and_embed() {
        let rich = RichText::new(vec![
            RichTextNode::Image(ImageBlock {
                url: "https://images.example.com/a.png".to_string(),
                alt: Some("A \"quoted\" alt".to_string()),
            }),
            RichTextNode::Embed(EmbedBlock {
                oembed: Some(OEmbed {
                    html: Some("<iframe></iframe>".to_string()),
                    embed_url: Some("https://youtu.be/x".to_string()),
                }),
            }),
            RichTextNode::Unknown,
        ]);
        assert_eq!(
            render(&rich),
            concat!(
                r#"<p class="block-img"><img src="https://images.example.com/a.png" alt="A &quot;quoted&quot; alt" /></p>"#,
                r#"<div data-oembed="https://youtu.be/x"><iframe></iframe></div>"#
            )
        );
    }

    #[test]
    fn test_render_inline() {
        let rich = RichText::new(vec![
            RichTextNode::Heading1(TextBlock::plain("Fashion Nova")),
            RichTextNode::Paragraph(TextBlock::plain("ignored")),
        ]);
        assert_eq!(render_inline(&rich), "Fashion Nova");
        assert_eq!(render_inline(&RichText::default()), "");
    }
}
