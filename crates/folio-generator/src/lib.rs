//! Folio Generator Library
//!
//! Turns a fetched content graph into the static homepage.
//!
//! # Modules
//!
//! - [`assembly`] - Homepage and featured-project selection, view models
//! - [`meta`] - Page metadata tags (description, Open Graph, Twitter)
//! - [`richtext`] - Rich text to HTML rendering
//! - [`template`] - HTML template system with variable interpolation
//! - [`html`] - Page rendering from view models
//! - [`clock`] - Injectable time source for the footer year
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assembly;
pub mod assets;
pub mod build;
pub mod clock;
pub mod html;
pub mod meta;
pub mod richtext;
pub mod template;

pub use assembly::{
    AboutView, AssemblyError, HeroView, PageModel, SocialLinkView, WorkCardView, WorkSection,
    assemble_page_model, select_featured, select_featured_projects,
    select_featured_projects_lenient, select_homepage,
};
pub use assets::{AssetManifest, AssetProcessor};
pub use build::{BuildStats, Builder};
pub use clock::{Clock, FixedClock, SystemClock};
pub use html::HtmlGenerator;
pub use meta::{MetaAttr, MetaTag, page_meta_tags};
pub use template::{Template, TemplateContext, TemplateRegistry};
