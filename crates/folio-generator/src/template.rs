//! HTML template system for page generation.
//!
//! Templates are plain strings with `{{ variable }}` placeholders. A trailing
//! `?` (`{{ variable? }}`) marks a placeholder as optional. Values are inserted
//! verbatim, so callers escape text before putting it in a context.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable `{variable}` in template `{template}`")]
    MissingVariable { template: String, variable: String },

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax in `{template}`: {message}")]
    InvalidSyntax { template: String, message: String },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when `value` is present.
    #[must_use]
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A named template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    ///
    /// Substituted values are never rescanned for placeholders.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut output = String::with_capacity(self.content.len());
        let mut rest = self.content.as_str();

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax {
                    template: self.name.clone(),
                    message: "unclosed {{ delimiter".to_string(),
                })?;

            let raw = after_open[..end].trim();
            let (var_name, optional) = match raw.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (raw, false),
            };

            match context.get(var_name) {
                Some(value) => output.push_str(value),
                None if optional => {}
                None => {
                    return Err(TemplateError::MissingVariable {
                        template: self.name.clone(),
                        variable: var_name.to_string(),
                    });
                }
            }

            rest = &after_open[end + 2..];
        }

        output.push_str(rest);
        Ok(output)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        self.register(Template::new("hero", DEFAULT_HERO_TEMPLATE));
        self.register(Template::new("button", DEFAULT_BUTTON_TEMPLATE));
        self.register(Template::new("work_section", DEFAULT_WORK_SECTION_TEMPLATE));
        self.register(Template::new("work_card", DEFAULT_WORK_CARD_TEMPLATE));
        self.register(Template::new("about", DEFAULT_ABOUT_TEMPLATE));
        self.register(Template::new("social_link", DEFAULT_SOCIAL_LINK_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Layout chrome: head with metadata, header, main content and footer.
pub const DEFAULT_BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    {{ meta_tags }}
    {{ canonical? }}
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="https://fonts.googleapis.com/css2?family=Inter:wght@400;600;700&display=swap" rel="stylesheet">
    <style>
        :root {
            --blue-200: #e0e9ff;
            --blue-500: #3a65ff;
            --blue-600: #2e52cc;
            --blue-900: #05103a;
            --teal-500: #14b8a6;
            --purple-500: #8b5cf6;
            --green-500: #22c55e;
            --orange-500: #f97316;
            --grey-200: #eceef2;
            --grey-600: #70747e;
            --grey-700: #585c66;
            --grey-900: #16171a;
            --max-width-mobile: 600px;
        }

        *, *::before, *::after { box-sizing: border-box; }

        body {
            margin: 0;
            font-family: 'Inter', system-ui, -apple-system, sans-serif;
            color: var(--grey-900);
            line-height: 1.6;
            -webkit-font-smoothing: antialiased;
        }

        a { color: currentColor; }

        .layout {
            max-width: 1200px;
            margin: 0 auto;
            padding: 0 2.5em;
        }

        .layout-header {
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 2em 0;
        }

        .logo {
            font-weight: 700;
            text-decoration: none;
        }

        .layout-header nav a {
            margin-left: 2em;
            font-weight: 600;
            text-decoration: none;
        }

        .hero {
            padding-top: 2.5em;
            padding-bottom: 3em;
            margin-bottom: 6em;
            max-width: 830px;
        }

        .hero h1 a { text-decoration: none; transition: all 100ms ease-in-out; }
        .hero h1:nth-of-type(1) a:nth-of-type(1) { color: var(--blue-500); }
        .hero h1:nth-of-type(2) a:nth-of-type(1) { color: var(--teal-500); }
        .hero h1:nth-of-type(2) a:nth-of-type(2) { color: var(--purple-500); }
        .hero h1:nth-of-type(2) a:nth-of-type(3) { color: var(--green-500); }
        .hero h1:nth-of-type(3) a:nth-of-type(1) { color: var(--orange-500); }
        .hero h1 a:hover { background-color: var(--blue-200); }

        .button {
            padding: 1em 2em;
            background: var(--blue-500);
            color: white;
            font-size: 1em;
            font-weight: 600;
            border: none;
            border-radius: 2px;
            cursor: pointer;
        }

        .button p { margin: 0; }
        .button:hover { background: var(--blue-600); }

        .button--secondary {
            background: var(--blue-200);
            color: var(--blue-600);
        }

        .section {
            margin-bottom: 10em;
            display: flex;
            flex-direction: column;
        }

        .section:last-of-type { margin-bottom: 0; }

        .project-card {
            display: grid;
            grid-template-columns: 4fr 7fr;
            margin-bottom: 4em;
            border-radius: 3px;
            box-shadow: 0 9px 24px rgba(0, 0, 0, 0.06);
            overflow: hidden;
        }

        .project-card-content { padding: 4em 3em 2.25em 2.5em; }
        .project-card-category { font-weight: 600; color: var(--grey-600); }
        .project-card-title a { text-decoration: none; }
        .project-card-blurb { margin-top: 0.5em; }
        .project-card-action { font-weight: 600; text-decoration: none; }
        .project-card-image { background: var(--grey-200); display: flex; align-items: center; justify-content: center; }
        .project-card-image img { max-width: 100%; }

        .work-action {
            font-weight: 600;
            text-decoration: none;
            margin-left: auto;
        }

        .about {
            padding-top: 1em;
            display: grid;
            grid-template-columns: 8em 1fr 8em;
            grid-gap: 3em;
        }

        .about-links {
            padding-top: 1em;
            padding-bottom: 3em;
            display: flex;
            flex-direction: column;
        }

        .about-link {
            display: flex;
            align-items: center;
            margin-bottom: 1.5em;
            font-weight: 600;
            text-decoration: none;
        }

        .about-link .link-icon { width: 25px; height: 25px; margin-right: 0.5rem; }
        .about-bio { padding-bottom: 3em; max-width: 480px; }
        .about-actions { padding-top: 1em; padding-bottom: 3em; }

        .footer {
            padding: 3em 0;
            display: flex;
            flex-direction: column;
            align-items: center;
        }

        .footer-author { font-size: 0.75em; color: var(--grey-700); }

        @media (max-width: 600px) {
            .hero { margin-bottom: 3em; }
            .section { margin-bottom: 4em; }
            .project-card { grid-template-columns: 1fr; }
            .about { grid-template-columns: 7em 1fr; grid-gap: 2em; }
            .about-actions { grid-column: 1 / -1; grid-row: 1; padding: 0; }
        }
    </style>
</head>
<body>
    <div class="layout">
        <header class="layout-header">
            <a href="/" class="logo">{{ site_title }}</a>
            <nav>
                <a href="{{ work_url }}">Work</a>
            </nav>
        </header>
        <main class="layout-main">
            {{ content }}
        </main>
        <footer class="footer">
            <a href="/" class="logo">{{ site_title }}</a>
            <div class="footer-author">&copy; {{ year }}</div>
        </footer>
    </div>
</body>
</html>"##;

/// Hero banner with the resume download button.
pub const DEFAULT_HERO_TEMPLATE: &str = r#"<section class="hero">
    {{ hero_title }}
    <a href="{{ resume_url }}" target="_blank" download rel="noopener noreferrer">
        {{ button }}
    </a>
</section>"#;

/// Generic button element.
pub const DEFAULT_BUTTON_TEMPLATE: &str =
    r#"<button class="button{{ modifier? }}" type="button">{{ label }}</button>"#;

/// Work section wrapping the project cards.
pub const DEFAULT_WORK_SECTION_TEMPLATE: &str = r#"<section class="section">
    <h1>Clients I've worked with...</h1>
    {{ cards }}
    <a class="work-action" href="{{ work_url }}">See more! <span>&#8594;</span></a>
</section>"#;

/// A single project card.
pub const DEFAULT_WORK_CARD_TEMPLATE: &str = r#"<div class="project-card">
    <div class="project-card-content">
        <div class="project-card-category">{{ category }}</div>
        <div class="project-card-title"><a href="{{ href }}">{{ title }}</a></div>
        <div class="project-card-blurb">{{ description }}</div>
        {{ external_link? }}
        <a class="project-card-action" href="{{ href }}">Details <span>&#8594;</span></a>
    </div>
    <div class="project-card-image">{{ thumbnail? }}</div>
</div>"#;

/// About panel: social links, bio and the email action.
pub const DEFAULT_ABOUT_TEMPLATE: &str = r#"<section class="section">
    {{ about_title }}
    <div class="about">
        <div class="about-links">
            {{ links }}
        </div>
        <div class="about-bio">{{ bio }}</div>
        <div class="about-actions">
            <a href="mailto:{{ email }}" target="_blank" rel="noopener noreferrer">
                {{ email_button }}
            </a>
        </div>
    </div>
</section>"#;

/// One social link of the about panel.
pub const DEFAULT_SOCIAL_LINK_TEMPLATE: &str = r#"<a class="about-link" href="{{ href }}" target="_blank" rel="noopener noreferrer">{{ icon? }}<span class="link-text">{{ label }}</span><span>&#8594;</span></a>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new().with_var("name", "World");

        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");

        assert_eq!(template.render(&TemplateContext::new()).unwrap(), "Hello!");

        let ctx = TemplateContext::new().with_opt("suffix", Some(", World"));
        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("card", "{{ title }}");
        let err = template.render(&TemplateContext::new()).unwrap_err();

        assert!(matches!(err, TemplateError::MissingVariable { .. }));
        assert!(err.to_string().contains("`card`"));
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("broken", "Hello {{ name");
        let err = template.render(&TemplateContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidSyntax { .. }));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = Template::new("test", "{{ a }}{{ b }}");
        let ctx = TemplateContext::new()
            .with_var("a", "{{ b }}")
            .with_var("b", "x");

        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}x");
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        for name in [
            "base",
            "hero",
            "button",
            "work_section",
            "work_card",
            "about",
            "social_link",
        ] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
        assert!(matches!(
            registry.render("nonexistent", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_render_base_template() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new()
            .with_var("lang", "en")
            .with_var("title", "My Site")
            .with_var("meta_tags", r#"<meta name="description" content="D">"#)
            .with_var("content", "<p>Hello!</p>")
            .with_var("site_title", "My Site")
            .with_var("work_url", "/work")
            .with_var("year", "2026");

        let result = registry.render("base", &ctx).unwrap();
        assert!(result.contains("<!DOCTYPE html>"));
        assert!(result.contains("<title>My Site</title>"));
        assert!(result.contains("<p>Hello!</p>"));
        assert!(result.contains("&copy; 2026"));
    }
}
