//! Content documents consumed by the site generator.
//!
//! Documents are read-only projections of what the content source returns.
//! Field names follow the content source's schema so that snapshots and API
//! responses decode without renaming.

use serde::{Deserialize, Deserializer, Serialize};

use crate::richtext::RichText;

/// Site-level metadata from static configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,
}

/// Reference to an image asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,

    #[serde(default)]
    pub alt: Option<String>,
}

/// Reference to an external or media link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    #[serde(default)]
    pub url: Option<String>,
}

/// Document metadata assigned by the content source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub uid: String,
}

/// The homepage singleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomepageDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_title: RichText,

    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_button_text: RichText,

    #[serde(default)]
    pub hero_button_link: Option<LinkRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub site_image: ImageRef,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: RichText,

    #[serde(default, deserialize_with = "null_as_default")]
    pub about_title: RichText,

    #[serde(default, deserialize_with = "null_as_default")]
    pub about_bio: RichText,

    #[serde(default, deserialize_with = "null_as_default")]
    pub about_links: Vec<SocialLink>,
}

/// One entry of the homepage's social link group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Rich-text label whose first span carries the target URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub about_link: RichText,

    #[serde(default)]
    pub link_icon: Option<LinkRef>,
}

impl SocialLink {
    /// Target URL of `about_link[0].spans[0]`.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.about_link
            .first()
            .and_then(|node| node.spans().first())
            .and_then(|span| span.url())
    }

    /// Label text of `about_link[0]`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.about_link.first_text()
    }

    /// Icon URL, when an icon is attached.
    #[must_use]
    pub fn icon_url(&self) -> Option<&str> {
        self.link_icon.as_ref().and_then(|icon| icon.url.as_deref())
    }
}

/// A client/work project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_title: RichText,

    #[serde(default, deserialize_with = "null_as_default")]
    pub project_preview_description: RichText,

    #[serde(default)]
    pub project_preview_thumbnail: Option<ImageRef>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub project_category: RichText,

    #[serde(default)]
    pub project_post_date: Option<String>,

    #[serde(default)]
    pub project_link: Option<LinkRef>,

    #[serde(rename = "_meta")]
    pub meta: DocumentMeta,
}

impl ProjectDocument {
    /// Stable identifier used for the detail page link.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.meta.uid
    }

    /// External link of the project, if any.
    #[must_use]
    pub fn external_link(&self) -> Option<&str> {
        self.project_link.as_ref().and_then(|l| l.url.as_deref())
    }
}

/// A fetched snapshot of everything the homepage needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentGraph {
    /// Homepage documents in source order.
    pub homepages: Vec<HomepageDocument>,

    /// Project documents in source order; `None` when the collection is absent.
    pub projects: Option<Vec<ProjectDocument>>,

    pub site: SiteMetadata,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
