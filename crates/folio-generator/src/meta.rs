//! Page metadata tags for search engines and social previews.

use folio_core::SiteMetadata;

use crate::richtext::escape_html;

/// Which attribute names the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    /// `<meta name="...">`
    Name,
    /// `<meta property="...">` (Open Graph)
    Property,
}

impl MetaAttr {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Property => "property",
        }
    }
}

/// A single `<meta>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub attr: MetaAttr,
    pub key: &'static str,
    pub content: String,
}

impl MetaTag {
    #[must_use]
    pub fn name(key: &'static str, content: impl Into<String>) -> Self {
        Self {
            attr: MetaAttr::Name,
            key,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn property(key: &'static str, content: impl Into<String>) -> Self {
        Self {
            attr: MetaAttr::Property,
            key,
            content: content.into(),
        }
    }

    /// Render as an HTML element with escaped content.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<meta {}="{}" content="{}">"#,
            self.attr.as_str(),
            self.key,
            escape_html(&self.content)
        )
    }
}

/// Metadata tags for the homepage, in emission order.
///
/// Title and description are repeated under their Open Graph and Twitter
/// names; the preview image is the homepage's site image.
#[must_use]
pub fn page_meta_tags(site: &SiteMetadata, image_url: &str) -> Vec<MetaTag> {
    vec![
        MetaTag::name("description", &site.description),
        MetaTag::property("og:title", &site.title),
        MetaTag::property("og:description", &site.description),
        MetaTag::property("og:type", "website"),
        MetaTag::property("og:image", image_url),
        MetaTag::name("twitter:card", "summary"),
        MetaTag::name("twitter:creator", &site.author),
        MetaTag::name("twitter:title", &site.title),
        MetaTag::name("twitter:description", &site.description),
    ]
}

/// Render a tag list, one element per line.
#[must_use]
pub fn render_meta_tags(tags: &[MetaTag]) -> String {
    tags.iter()
        .map(MetaTag::to_html)
        .collect::<Vec<_>>()
        .join("\n    ")
}
