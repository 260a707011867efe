//! The homepage content query and its response shape.

use folio_core::{ContentGraph, HomepageDocument, ProjectDocument, SiteMetadata};
use serde::{Deserialize, Serialize};

/// GraphQL document fetching every homepage and project.
///
/// Rich-text and image fields are JSON scalars in the Prismic schema and take
/// no selection set.
pub const QUERY: &str = r#"{
  allHomepages {
    edges {
      node {
        hero_title
        site_image
        hero_button_text
        hero_button_link {
          ... on _ExternalLink {
            _linkType
            url
          }
        }
        content
        about_title
        about_bio
        about_links {
          about_link
          link_icon {
            ... on _ImageLink {
              _linkType
              url
            }
          }
        }
      }
    }
  }
  allProjects {
    edges {
      node {
        project_title
        project_preview_description
        project_preview_thumbnail
        project_category
        project_post_date
        project_link {
          ... on _ExternalLink {
            url
          }
        }
        _meta {
          uid
        }
      }
    }
  }
}"#;

/// Collapse whitespace so the query fits in a GET query string.
#[must_use]
pub fn minify_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Full response shape: content documents plus site metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub prismic: PrismicData,

    #[serde(default)]
    pub site: Option<SiteData>,
}

/// The content backend's portion of the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrismicData {
    #[serde(default)]
    pub all_homepages: Option<Connection<HomepageDocument>>,

    #[serde(default)]
    pub all_projects: Option<Connection<ProjectDocument>>,
}

/// Relay-style connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

/// One edge of a connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Site section of the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteData {
    #[serde(rename = "siteMetadata")]
    pub site_metadata: SiteMetadata,
}

impl<T> Connection<T> {
    fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

impl QueryResponse {
    /// Wrap backend data that arrived without a site section.
    #[must_use]
    pub fn from_prismic(prismic: PrismicData) -> Self {
        Self {
            prismic,
            site: None,
        }
    }

    /// Normalize into a [`ContentGraph`].
    ///
    /// `default_site` is used when the response carries no site section. A
    /// missing homepage connection is an empty list; a missing project
    /// connection stays absent.
    #[must_use]
    pub fn into_graph(self, default_site: SiteMetadata) -> ContentGraph {
        let homepages = self
            .prismic
            .all_homepages
            .map(Connection::into_nodes)
            .unwrap_or_default();
        let projects = self.prismic.all_projects.map(Connection::into_nodes);
        let site = self.site.map_or(default_site, |s| s.site_metadata);

        ContentGraph {
            homepages,
            projects,
            site,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteMetadata {
        SiteMetadata {
            title: "From config".to_string(),
            description: "D".to_string(),
            author: "A".to_string(),
        }
    }

    #[test]
    fn test_query_requests_required_fields() {
        for field in [
            "hero_title",
            "hero_button_text",
            "site_image",
            "about_title",
            "about_bio",
            "about_links",
            "link_icon",
            "project_title",
            "project_preview_description",
            "project_preview_thumbnail",
            "project_category",
            "project_post_date",
            "project_link",
            "uid",
        ] {
            assert!(QUERY.contains(field), "query is missing {field}");
        }
    }

    #[test]
    fn test_minify_query() {
        let minified = minify_query(QUERY);
        assert!(!minified.contains('\n'));
        assert!(!minified.contains("  "));
        assert!(minified.starts_with("{ allHomepages { edges"));
    }

    #[test]
    fn test_into_graph_keeps_order() {
        let json = r#"{
            "prismic": {
                "allHomepages": {"edges": [
                    {"node": {"hero_title": [{"type": "heading1", "text": "H1", "spans": []}]}},
                    {"node": {"hero_title": [{"type": "heading1", "text": "H2", "spans": []}]}}
                ]},
                "allProjects": {"edges": [
                    {"node": {"project_title": [{"type": "heading1", "text": "B", "spans": []}], "_meta": {"uid": "b"}}},
                    {"node": {"project_title": [{"type": "heading1", "text": "A", "spans": []}], "_meta": {"uid": "a"}}}
                ]}
            },
            "site": {"siteMetadata": {"title": "T", "description": "D", "author": "A"}}
        }"#;

        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let graph = response.into_graph(site());

        assert_eq!(graph.homepages.len(), 2);
        assert_eq!(graph.homepages[0].hero_title.first_text(), Some("H1"));
        let uids: Vec<_> = graph
            .projects
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.uid())
            .collect();
        assert_eq!(uids, ["b", "a"]);
        assert_eq!(graph.site.title, "T");
    }

    #[test]
    fn test_into_graph_absent_collections() {
        let json = r#"{"prismic": {"allHomepages": null, "allProjects": null}}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let graph = response.into_graph(site());

        assert!(graph.homepages.is_empty());
        assert!(graph.projects.is_none());
        assert_eq!(graph.site.title, "From config");
    }

    #[test]
    fn test_into_graph_empty_projects_is_not_absent() {
        let json = r#"{"prismic": {"allProjects": {"edges": []}}}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        let graph = response.into_graph(site());

        assert_eq!(graph.projects, Some(Vec::new()));
    }
}
