//! Publish Flow
//!
//! Link a small batch of articles against a catalog, chunk one of them for
//! an LLM pass, and publish the batch to a sink that just prints.
//!
//! ```bash
//! cargo run --example publish_flow
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use interlink::{
    chunk_article, limit_tool_output, publish_batch, ArticleDraft, ChunkOptions, LinkCatalog,
    LinkableArticle, PostSink, PreparedPost, PublishError, PublishOptions,
};

/// Prints each post and hands out sequential ids.
struct StdoutSink {
    next_id: AtomicU64,
}

impl PostSink for StdoutSink {
    async fn upsert(&self, post: PreparedPost) -> Result<u64, PublishError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        println!("  #{id} /{} ({} links)", post.slug, post.links.len());
        println!("     {}", post.html);
        Ok(id)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let catalog = LinkCatalog::new(vec![
        LinkableArticle::new("body", "Body Cam Ratgeber", "body-cam-ratgeber", "Body Cam", "de"),
        LinkableArticle::new("dash", "Dashcam Test", "dashcam-test", "Dashcam", "de")
            .with_external_post_id(412),
        LinkableArticle::new(
            "cctv",
            "Security Camera Guide",
            "security-camera",
            "Security Camera",
            "en",
        ),
    ]);
    println!("Catalog: {:?}\n", catalog.stats());

    let drafts = vec![
        ArticleDraft {
            id: "body".into(),
            title: "Body Cam Ratgeber".into(),
            primary_keyword: Some("Body Cam".into()),
            html: "<p>Wer eine Body Cam trägt, filmt oft auch mit einer Dashcam.</p>".into(),
        },
        ArticleDraft {
            id: "dash".into(),
            title: "Dashcam Test".into(),
            primary_keyword: None,
            html: "<p>Die Dashcam ergänzt die Body Cam. <a href=\"/x\">Body Cam</a></p>".into(),
        },
    ];

    // Chunk an article before sending it to a model
    let long = format!(
        "## Technik\n\n{}\n\n## Recht\n\n{}",
        "Sensor und Akku. ".repeat(80),
        "Datenschutz gilt. ".repeat(80),
    );
    let chunks = chunk_article(&long, &ChunkOptions::default().with_max_chunk_size(1000));
    println!("Chunks:");
    for chunk in &chunks {
        println!("  {chunk}");
    }

    // Keep a tool result within budget
    let limited = limit_tool_output(&chunks, 500).unwrap_or_else(|e| panic!("serialize: {e}"));
    println!("\nTool output truncated: {}", limited.truncated);
    if limited.truncated {
        println!("  {}", limited.summary);
    }

    println!("\nPublishing:");
    let sink = Arc::new(StdoutSink { next_id: AtomicU64::new(1) });
    let opts = PublishOptions::default().with_internal_links(5);
    let report = publish_batch(sink, &catalog, &drafts, &opts).await;

    println!("\nPublished {} of {}", report.published().len(), report.outcomes.len());
}
