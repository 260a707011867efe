//! HTML generation from the homepage view model.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use folio_core::Config;
use thiserror::Error;
use tracing::debug;

use crate::{
    assembly::{AboutView, HeroView, PageModel, SocialLinkView, WorkCardView, WorkSection},
    clock::{Clock, SystemClock},
    meta::render_meta_tags,
    richtext::{self, escape_html},
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Renders the homepage.
#[derive(Debug, Clone)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    language: String,
    canonical_url: Option<String>,
    clock: Arc<dyn Clock>,
}

impl HtmlGenerator {
    /// Create a generator for the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            language: config.site.language.clone(),
            canonical_url: config.url_for("/"),
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different time source for the footer year.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Render the full homepage document.
    pub fn render_home(&self, page: &PageModel) -> Result<String> {
        debug!(cards = page.work.cards.len(), "rendering homepage");

        let content = [
            self.render_hero(&page.hero)?,
            self.render_work_section(&page.work)?,
            self.render_about(&page.about)?,
        ]
        .join("\n");

        let ctx = TemplateContext::new()
            .with_var("lang", escape_html(&self.language))
            .with_var("title", escape_html(&page.title))
            .with_var("meta_tags", render_meta_tags(&page.meta))
            .with_opt(
                "canonical",
                self.canonical_url
                    .as_deref()
                    .map(|url| format!(r#"<link rel="canonical" href="{}">"#, escape_html(url))),
            )
            .with_var("site_title", escape_html(&page.title))
            .with_var("work_url", escape_html(&page.work.more_url))
            .with_var("content", content)
            .with_var("year", self.clock.year().to_string());

        Ok(self.templates.render("base", &ctx)?)
    }

    fn render_button(&self, label_html: &str, modifier: Option<&str>) -> Result<String> {
        let ctx = TemplateContext::new()
            .with_var("label", label_html)
            .with_opt("modifier", modifier.map(|m| format!(" {m}")));
        Ok(self.templates.render("button", &ctx)?)
    }

    fn render_hero(&self, hero: &HeroView) -> Result<String> {
        let button = self.render_button(&richtext::render(&hero.button_text), None)?;
        let ctx = TemplateContext::new()
            .with_var("hero_title", richtext::render(&hero.title))
            .with_var("resume_url", escape_html(&hero.resume_url))
            .with_var("button", button);
        Ok(self.templates.render("hero", &ctx)?)
    }

    fn render_work_section(&self, work: &WorkSection) -> Result<String> {
        let cards = work
            .cards
            .iter()
            .map(|card| self.render_card(card))
            .collect::<Result<Vec<_>>>()?
            .join("\n");

        let ctx = TemplateContext::new()
            .with_var("cards", cards)
            .with_var("work_url", escape_html(&work.more_url));
        Ok(self.templates.render("work_section", &ctx)?)
    }

    fn render_card(&self, card: &WorkCardView) -> Result<String> {
        let thumbnail = card.thumbnail.as_ref().map(|image| {
            format!(
                r#"<img src="{}" alt="{}" />"#,
                escape_html(&image.url),
                escape_html(image.alt.as_deref().unwrap_or_default())
            )
        });
        let external = card.external_link.as_deref().map(|url| {
            format!(
                r#"<a class="project-card-link" href="{}" target="_blank" rel="noopener noreferrer">Visit site</a>"#,
                escape_html(url)
            )
        });

        let ctx = TemplateContext::new()
            .with_var("category", richtext::render_inline(&card.category))
            .with_var("title", richtext::render_inline(&card.title))
            .with_var("description", richtext::render(&card.description))
            .with_var("href", escape_html(&card.href))
            .with_opt("thumbnail", thumbnail)
            .with_opt("external_link", external);
        Ok(self.templates.render("work_card", &ctx)?)
    }

    fn render_about(&self, about: &AboutView) -> Result<String> {
        let links = about
            .links
            .iter()
            .map(|link| self.render_social_link(link))
            .collect::<Result<Vec<_>>>()?
            .join("\n            ");
        let email_button = self.render_button("Email me", Some("button--secondary"))?;

        let ctx = TemplateContext::new()
            .with_var("about_title", richtext::render(&about.title))
            .with_var("links", links)
            .with_var("bio", richtext::render(&about.bio))
            .with_var("email", escape_html(&about.email))
            .with_var("email_button", email_button);
        Ok(self.templates.render("about", &ctx)?)
    }

    fn render_social_link(&self, link: &SocialLinkView) -> Result<String> {
        let icon = link.icon.as_deref().map(|src| {
            format!(
                r#"<img class="link-icon" src="{}" alt="{} Icon" />"#,
                escape_html(src),
                escape_html(&link.label)
            )
        });

        let ctx = TemplateContext::new()
            .with_var("href", escape_html(&link.href))
            .with_var("label", escape_html(&link.label))
            .with_opt("icon", icon);
        Ok(self.templates.render("social_link", &ctx)?)
    }

    /// Where the homepage is written.
    #[must_use]
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join("index.html")
    }
}
