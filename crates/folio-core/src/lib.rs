//! Folio Core Library
//!
//! Core types, configuration, and error handling for the Folio portfolio site generator.

pub mod config;
pub mod content;
pub mod error;
pub mod richtext;

pub use config::{AllowList, Config, ContactConfig, MalformedPolicy};
pub use content::{
    ContentGraph, HomepageDocument, ImageRef, LinkRef, ProjectDocument, SiteMetadata, SocialLink,
};
pub use error::{CoreError, Result};
pub use richtext::{RichText, RichTextNode, Span, SpanKind};
