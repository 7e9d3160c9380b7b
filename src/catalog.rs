//! The catalog of link targets and keyword matching against it.
//!
//! ## How Matching Works
//!
//! Every published article owns one primary keyword. When another article
//! of the same language mentions that keyword, it gets a link to the owner:
//!
//! ```text
//! Catalog (load order):  "Body Cam" -> /body-cam    "Dashcam" -> /dashcam-test
//! Content:               "Eine Dashcam ... die beste BODY CAM ..."
//!
//! Links (catalog order): [Body Cam -> /body-cam, Dashcam -> /dashcam-test]
//! ```
//!
//! Matching is a plain case-insensitive substring test: "Cam" matches
//! inside "Camera" at this stage. Whole-word placement is enforced later,
//! when the links are written into [HTML](crate::insert_links_into_html) or
//! [Markdown](crate::insert_links_into_markdown), and a link that finds no
//! word-aligned spot there is skipped.
//!
//! Links come back in catalog order, not in order of appearance, and never
//! point to the same slug twice.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default cap on links per article.
pub const DEFAULT_MAX_LINKS: usize = 5;

/// A published article that other articles may link to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkableArticle {
    /// Identifier, unique within a catalog.
    pub id: String,
    /// Display title, used as the link's `title` attribute.
    pub title: String,
    /// URL path segment.
    pub slug: String,
    /// Phrase that triggers a link to this article.
    pub primary_keyword: String,
    /// Language tag; links never cross languages.
    pub language: String,
    /// Post id on the publishing platform, if already published there.
    #[serde(default, alias = "wpPostId", skip_serializing_if = "Option::is_none")]
    pub external_post_id: Option<u64>,
}

impl LinkableArticle {
    /// Create a link target without an external post id.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        slug: impl Into<String>,
        primary_keyword: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            primary_keyword: primary_keyword.into(),
            language: language.into(),
            external_post_id: None,
        }
    }

    /// Set the external post id.
    #[must_use]
    pub fn with_external_post_id(mut self, post_id: u64) -> Self {
        self.external_post_id = Some(post_id);
        self
    }

    /// The URL links to this article point at.
    ///
    /// `/posts/{id}` when the article has an external post id, else `/{slug}`.
    #[must_use]
    pub fn target_url(&self) -> String {
        match self.external_post_id {
            Some(post_id) => format!("/posts/{post_id}"),
            None => format!("/{}", self.slug),
        }
    }
}

/// A link opportunity found in a piece of content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalLink {
    /// The target's primary keyword, in catalog casing.
    pub keyword: String,
    /// Slug of the target.
    pub target_slug: String,
    /// Title of the target.
    pub target_title: String,
    /// URL of the target.
    pub target_url: String,
    /// Language of the target.
    pub language: String,
}

impl From<&LinkableArticle> for InternalLink {
    fn from(article: &LinkableArticle) -> Self {
        Self {
            keyword: article.primary_keyword.clone(),
            target_slug: article.slug.clone(),
            target_title: article.title.clone(),
            target_url: article.target_url(),
            language: article.language.clone(),
        }
    }
}

/// Size of a catalog, overall and per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Number of articles.
    pub total: usize,
    /// Number of articles per language tag.
    pub by_language: BTreeMap<String, usize>,
}

/// An immutable snapshot of linkable articles for one run.
///
/// ## Example
///
/// ```rust
/// use interlink::{LinkCatalog, LinkableArticle};
///
/// let catalog = LinkCatalog::new(vec![
///     LinkableArticle::new("a", "Body Cam Ratgeber", "body-cam", "Body Cam", "de"),
///     LinkableArticle::new("b", "Dashcam Test", "dashcam-test", "Dashcam", "de")
///         .with_external_post_id(123),
/// ]);
///
/// let content = "Die beste Body Cam. Eine Dashcam.";
/// let links = catalog.find_internal_links(content, "current", "de", 5);
/// assert_eq!(links.len(), 2);
/// assert_eq!(links[0].target_url, "/body-cam");
/// assert_eq!(links[1].target_url, "/posts/123");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCatalog {
    articles: Vec<LinkableArticle>,
}

impl LinkCatalog {
    /// Create a catalog; order of `articles` is the matching priority.
    #[must_use]
    pub fn new(articles: impl IntoIterator<Item = LinkableArticle>) -> Self {
        let mut catalog = Self::default();
        catalog.load_articles(articles);
        catalog
    }

    /// Replace the whole catalog.
    pub fn load_articles(&mut self, articles: impl IntoIterator<Item = LinkableArticle>) {
        self.articles = articles.into_iter().collect();
        info!(
            articles = self.articles.len(),
            "loaded articles for internal linking"
        );
    }

    /// The articles in load order.
    #[must_use]
    pub fn articles(&self) -> &[LinkableArticle] {
        &self.articles
    }

    /// Number of articles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Catalog size overall and per language.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let mut by_language = BTreeMap::new();
        for article in &self.articles {
            *by_language.entry(article.language.clone()).or_insert(0) += 1;
        }
        CatalogStats {
            total: self.articles.len(),
            by_language,
        }
    }

    /// Find up to `max_links` articles whose keyword occurs in `content`.
    ///
    /// Only articles in `language` are considered, and never the article
    /// identified by `current_article_id`. Articles with a blank keyword are
    /// ignored. A `max_links` of zero returns no links.
    #[must_use]
    pub fn find_internal_links(
        &self,
        content: &str,
        current_article_id: &str,
        language: &str,
        max_links: usize,
    ) -> Vec<InternalLink> {
        let content_lower = content.to_lowercase();
        let mut links: Vec<InternalLink> = Vec::new();

        let candidates = self
            .articles
            .iter()
            .filter(|a| a.language == language && a.id != current_article_id);

        for article in candidates {
            if links.len() >= max_links {
                break;
            }

            let keyword = article.primary_keyword.as_str();
            if keyword.trim().is_empty() || !content_lower.contains(&keyword.to_lowercase()) {
                continue;
            }
            if links.iter().any(|link| link.target_slug == article.slug) {
                continue;
            }

            debug!(keyword, target = %article.title, "found link opportunity");
            links.push(InternalLink::from(article));
        }

        debug!(links = links.len(), language, "internal link search finished");
        links
    }
}

impl FromIterator<LinkableArticle> for LinkCatalog {
    fn from_iter<I: IntoIterator<Item = LinkableArticle>>(iter: I) -> Self {
        Self::new(iter)
    }
}
