//! Homepage assembly.
//!
//! Selects which documents appear on the homepage and maps them onto the
//! plain view structures the HTML layer renders. Everything here is a pure
//! function of its inputs.

use folio_core::{
    AllowList, ContactConfig, HomepageDocument, ImageRef, MalformedPolicy, ProjectDocument,
    RichText, SiteMetadata, SocialLink,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::meta::{MetaTag, page_meta_tags};

/// Assembly errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// A document lacks a field the homepage dereferences unconditionally.
    #[error("malformed document `{document}`: missing {field}")]
    MalformedDocument {
        document: String,
        field: &'static str,
    },
}

impl AssemblyError {
    fn malformed(document: impl Into<String>, field: &'static str) -> Self {
        Self::MalformedDocument {
            document: document.into(),
            field,
        }
    }
}

/// Result type for assembly operations.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Everything needed to render the homepage.
#[derive(Debug, Clone, PartialEq)]
pub struct PageModel {
    /// Document title.
    pub title: String,
    pub meta: Vec<MetaTag>,
    pub hero: HeroView,
    pub work: WorkSection,
    pub about: AboutView,
}

/// Hero banner inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroView {
    pub title: RichText,
    pub button_text: RichText,
    /// Site-relative path of the resume download.
    pub resume_url: String,
}

/// Work section inputs. An empty card list still renders the section.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkSection {
    pub cards: Vec<WorkCardView>,
    /// Target of the "See more!" link.
    pub more_url: String,
}

/// One project card.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkCardView {
    pub uid: String,
    pub category: RichText,
    pub title: RichText,
    pub description: RichText,
    pub thumbnail: Option<ImageRef>,
    /// Detail page link, `{work_path}/{uid}`.
    pub href: String,
    pub external_link: Option<String>,
}

/// About panel inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AboutView {
    pub title: RichText,
    pub bio: RichText,
    pub links: Vec<SocialLinkView>,
    pub email: String,
}

/// One social link of the about panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLinkView {
    pub href: String,
    pub label: String,
    pub icon: Option<String>,
}

/// The homepage document to render: the first one returned, if any.
#[must_use]
pub fn select_homepage(homepages: &[HomepageDocument]) -> Option<&HomepageDocument> {
    if homepages.len() > 1 {
        debug!(count = homepages.len(), "multiple homepage documents, using the first");
    }
    homepages.first()
}

/// Projects whose first title run is on the allow-list, in source order.
///
/// Fails on the first project without a title run.
pub fn select_featured_projects<'a>(
    projects: &'a [ProjectDocument],
    allow_list: &AllowList,
) -> Result<Vec<&'a ProjectDocument>> {
    let mut selected = Vec::new();
    for project in projects {
        if allow_list.contains(title_key(project)?) {
            selected.push(project);
        }
    }
    Ok(selected)
}

/// Like [`select_featured_projects`], but skips projects without a title run.
#[must_use]
pub fn select_featured_projects_lenient<'a>(
    projects: &'a [ProjectDocument],
    allow_list: &AllowList,
) -> Vec<&'a ProjectDocument> {
    projects
        .iter()
        .filter(|project| match title_key(project) {
            Ok(title) => allow_list.contains(title),
            Err(err) => {
                warn!(%err, "skipping project");
                false
            }
        })
        .collect()
}

/// Select featured projects under the given malformed-document policy.
pub fn select_featured<'a>(
    projects: &'a [ProjectDocument],
    allow_list: &AllowList,
    policy: MalformedPolicy,
) -> Result<Vec<&'a ProjectDocument>> {
    match policy {
        MalformedPolicy::Fail => select_featured_projects(projects, allow_list),
        MalformedPolicy::Skip => Ok(select_featured_projects_lenient(projects, allow_list)),
    }
}

fn title_key(project: &ProjectDocument) -> Result<&str> {
    project
        .project_title
        .first_text()
        .ok_or_else(|| AssemblyError::malformed(project.uid(), "project_title[0].text"))
}

/// Build the homepage view model.
///
/// Returns `Ok(None)` when the homepage document or the project collection
/// is absent; the page then renders nothing. An empty project selection is
/// not absent and yields an empty work section.
pub fn assemble_page_model(
    homepage: Option<&HomepageDocument>,
    projects: Option<&[&ProjectDocument]>,
    site: &SiteMetadata,
    contact: &ContactConfig,
    policy: MalformedPolicy,
) -> Result<Option<PageModel>> {
    let (Some(home), Some(projects)) = (homepage, projects) else {
        return Ok(None);
    };

    let work_path = contact.work_path.trim_end_matches('/');
    let cards = projects
        .iter()
        .map(|project| work_card(project, work_path))
        .collect();

    let links = social_links(&home.about_links, policy)?;

    Ok(Some(PageModel {
        title: site.title.clone(),
        meta: page_meta_tags(site, &home.site_image.url),
        hero: HeroView {
            title: home.hero_title.clone(),
            button_text: home.hero_button_text.clone(),
            resume_url: contact.resume.clone(),
        },
        work: WorkSection {
            cards,
            more_url: if work_path.is_empty() { "/" } else { work_path }.to_string(),
        },
        about: AboutView {
            title: home.about_title.clone(),
            bio: home.about_bio.clone(),
            links,
            email: contact.email.clone(),
        },
    }))
}

fn work_card(project: &ProjectDocument, work_path: &str) -> WorkCardView {
    WorkCardView {
        uid: project.uid().to_string(),
        category: project.project_category.clone(),
        title: project.project_title.clone(),
        description: project.project_preview_description.clone(),
        thumbnail: project.project_preview_thumbnail.clone(),
        href: format!("{work_path}/{}", project.uid()),
        external_link: project.external_link().map(str::to_string),
    }
}

fn social_links(links: &[SocialLink], policy: MalformedPolicy) -> Result<Vec<SocialLinkView>> {
    let mut views = Vec::with_capacity(links.len());
    for (i, link) in links.iter().enumerate() {
        match social_link(link) {
            Ok(view) => views.push(view),
            Err(err) if policy == MalformedPolicy::Skip => {
                warn!(index = i, %err, "skipping social link");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(views)
}

fn social_link(link: &SocialLink) -> Result<SocialLinkView> {
    let label = link
        .label()
        .ok_or_else(|| AssemblyError::malformed("homepage", "about_link[0].text"))?;
    let href = link
        .url()
        .ok_or_else(|| AssemblyError::malformed("homepage", "about_link[0].spans[0].data.url"))?;

    Ok(SocialLinkView {
        href: href.to_string(),
        label: label.to_string(),
        icon: link.icon_url().map(str::to_string),
    })
}
