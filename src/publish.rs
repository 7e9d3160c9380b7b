//! Publishing orchestration: link insertion, slug, upsert.
//!
//! ## Steps per Article
//!
//! ```text
//! designed HTML ──> find + insert internal links ──> slug ──> PostSink::upsert
//!                   (optional)                        (keyword or title)
//! ```
//!
//! HTML design generation and the remote publishing API live outside this
//! crate: the article arrives with its HTML already rendered, and the remote
//! side is whatever implements [`PostSink`].
//!
//! ## Batches
//!
//! [`publish_batch`] runs `concurrency` upserts at a time, waits for the whole
//! batch, pauses for `batch_delay_ms`, and moves on. A failed article never
//! cancels its siblings; every article gets its own [`PublishOutcome`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::DEFAULT_MAX_LINKS;
use crate::text::create_slug;
use crate::{insert_links_into_html, InternalLink, LinkCatalog};

/// Publication state requested for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Live.
    Publish,
    /// Saved, not visible.
    #[default]
    Draft,
    /// Awaiting review.
    Pending,
}

/// Options for [`prepare_post`] and [`publish_batch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PublishOptions {
    /// Requested post status.
    pub status: PostStatus,
    /// Whether to insert internal links.
    pub add_internal_links: bool,
    /// Cap on inserted links.
    ///
    /// Zero means no links, as with
    /// [`find_internal_links`](LinkCatalog::find_internal_links); it is not
    /// replaced by the default. Leave the field out to get the default of 5.
    pub max_internal_links: usize,
    /// Language of the post; also selects link targets.
    pub language: String,
    /// Category ids to assign.
    pub category_ids: Vec<u64>,
    /// Tag ids to assign.
    pub tag_ids: Vec<u64>,
    /// Upserts in flight per batch.
    pub concurrency: usize,
    /// Pause between batches, in milliseconds.
    pub batch_delay_ms: u64,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            status: PostStatus::Draft,
            add_internal_links: false,
            max_internal_links: DEFAULT_MAX_LINKS,
            language: "de".to_string(),
            category_ids: Vec::new(),
            tag_ids: Vec::new(),
            concurrency: 3,
            batch_delay_ms: 500,
        }
    }
}

impl PublishOptions {
    /// Enable internal linking with at most `max_links` links.
    #[must_use]
    pub fn with_internal_links(mut self, max_links: usize) -> Self {
        self.add_internal_links = true;
        self.max_internal_links = max_links;
        self
    }

    /// Set the post language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the requested status.
    #[must_use]
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }
}

/// An article ready for publishing, with its designed HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    /// Article identifier; excluded from its own links.
    pub id: String,
    /// Post title.
    pub title: String,
    /// Preferred slug source.
    #[serde(default)]
    pub primary_keyword: Option<String>,
    /// Rendered article body.
    pub html: String,
}

/// A post as handed to the publishing platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedPost {
    /// Id of the source article.
    pub article_id: String,
    /// Post title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Body with internal links applied.
    pub html: String,
    /// Requested status.
    pub status: PostStatus,
    /// Post language.
    pub language: String,
    /// Category ids.
    pub categories: Vec<u64>,
    /// Tag ids.
    pub tags: Vec<u64>,
    /// Links that were looked for in the body.
    pub links: Vec<InternalLink>,
}

/// Errors from publishing a single post.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The publishing platform rejected or failed the request.
    #[error("remote publish failed: {0}")]
    Remote(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The publishing task panicked or was cancelled.
    #[error("publish task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The remote side of publishing: create the post, or update the existing
/// post with the same slug.
pub trait PostSink: Send + Sync + 'static {
    /// Create or update `post`, returning the platform's post id.
    fn upsert(&self, post: PreparedPost) -> impl Future<Output = Result<u64, PublishError>> + Send;
}

/// Result of publishing one article.
#[derive(Debug)]
pub struct PublishOutcome {
    /// Id of the source article.
    pub article_id: String,
    /// Post id, or why publishing failed.
    pub result: Result<u64, PublishError>,
}

/// All outcomes of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per article.
    pub outcomes: Vec<PublishOutcome>,
}

impl BatchReport {
    /// Post ids of the articles that were published.
    #[must_use]
    pub fn published(&self) -> Vec<u64> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().copied())
            .collect()
    }

    /// Articles that failed, with their errors.
    #[must_use]
    pub fn failures(&self) -> Vec<(&str, &PublishError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.article_id.as_str(), e)))
            .collect()
    }
}

/// Apply internal links and compute the slug for one article.
///
/// The slug comes from the primary keyword, or the title when the keyword
/// is missing or blank.
///
/// ```rust
/// use interlink::{prepare_post, ArticleDraft, LinkCatalog, LinkableArticle, PublishOptions};
///
/// let catalog = LinkCatalog::new(vec![
///     LinkableArticle::new("dash", "Dashcam Test", "dashcam-test", "Dashcam", "de"),
/// ]);
/// let draft = ArticleDraft {
///     id: "body".into(),
///     title: "Body Cam Ratgeber".into(),
///     primary_keyword: Some("Body Cam für Polizei".into()),
///     html: "<p>Anders als eine Dashcam ...</p>".into(),
/// };
///
/// let post = prepare_post(&catalog, &draft, &PublishOptions::default().with_internal_links(5));
/// assert_eq!(post.slug, "body-cam-fuer-polizei");
/// assert!(post.html.contains(r#"<a href="/dashcam-test""#));
/// ```
#[must_use]
pub fn prepare_post(
    catalog: &LinkCatalog,
    article: &ArticleDraft,
    opts: &PublishOptions,
) -> PreparedPost {
    let (html, links) = if opts.add_internal_links {
        let links = catalog.find_internal_links(
            &article.html,
            &article.id,
            &opts.language,
            opts.max_internal_links,
        );
        (insert_links_into_html(&article.html, &links), links)
    } else {
        (article.html.clone(), Vec::new())
    };

    let slug_source = article
        .primary_keyword
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .unwrap_or(&article.title);

    PreparedPost {
        article_id: article.id.clone(),
        title: article.title.clone(),
        slug: create_slug(slug_source),
        html,
        status: opts.status,
        language: opts.language.clone(),
        categories: opts.category_ids.clone(),
        tags: opts.tag_ids.clone(),
        links,
    }
}

/// Publish `articles` in batches of `opts.concurrency` concurrent upserts.
///
/// Must be called within a Tokio runtime.
pub async fn publish_batch<S: PostSink>(
    sink: Arc<S>,
    catalog: &LinkCatalog,
    articles: &[ArticleDraft],
    opts: &PublishOptions,
) -> BatchReport {
    let batch_size = opts.concurrency.max(1);
    let mut report = BatchReport::default();

    info!(
        articles = articles.len(),
        concurrency = batch_size,
        "batch publishing"
    );

    for (batch_index, batch) in articles.chunks(batch_size).enumerate() {
        if batch_index > 0 && opts.batch_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(opts.batch_delay_ms)).await;
        }

        let handles: Vec<_> = batch
            .iter()
            .map(|article| {
                let post = prepare_post(catalog, article, opts);
                let sink = Arc::clone(&sink);
                (article.id.clone(), tokio::spawn(async move { sink.upsert(post).await }))
            })
            .collect();

        for (article_id, handle) in handles {
            let result = handle.await.map_err(PublishError::from).and_then(|r| r);
            match &result {
                Ok(post_id) => info!(article = %article_id, post_id, "published"),
                Err(error) => warn!(article = %article_id, %error, "publish failed"),
            }
            report.outcomes.push(PublishOutcome { article_id, result });
        }
    }

    info!(
        published = report.published().len(),
        failed = report.outcomes.len() - report.published().len(),
        "batch complete"
    );
    report
}
