//! Resolving feed items into full article content.

use super::extract::extract_page;
use super::summary::{KEYWORD_COUNT, SUMMARY_SENTENCES, keywords, summarize};
use crate::error::ResolveError;
use crate::models::{ArticleContent, FeedItem};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, instrument};
use url::Url;

/// Something that can turn a feed item into article content.
///
/// Failures are scoped to the item; the pipeline keeps going either way.
pub trait ItemResolver {
    async fn resolve(&self, item: &FeedItem) -> Result<ArticleContent, ResolveError>;
}

/// [`ItemResolver`] that downloads the article over HTTP and extracts it.
#[derive(Debug, Clone)]
pub struct HttpResolver {
    client: Client,
}

impl HttpResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ItemResolver for HttpResolver {
    #[instrument(level = "info", skip_all, fields(url = %item.link))]
    async fn resolve(&self, item: &FeedItem) -> Result<ArticleContent, ResolveError> {
        let t0 = Instant::now();
        let response = self.client.get(&item.link).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: item.link.clone(),
                status: status.as_u16(),
            });
        }

        // Redirects are followed, so resolve relative URLs against where we landed.
        let final_url = response.url().clone();
        let html = response.text().await?;
        debug!(%final_url, bytes = html.len(), "Downloaded article");

        let content = content_from_html(&html, &final_url, Some(&item.title))?;
        info!(
            title = %truncate_for_log(&item.title, 80),
            chars = content.full_text.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Resolved article"
        );
        Ok(content)
    }
}

/// Build [`ArticleContent`] from a downloaded page.
///
/// `feed_title` is used to steer the summary when the page declares no
/// headline of its own.
pub fn content_from_html(
    html: &str,
    page_url: &Url,
    feed_title: Option<&str>,
) -> Result<ArticleContent, ResolveError> {
    let page = extract_page(html, page_url);
    if page.text.trim().is_empty() {
        return Err(ResolveError::EmptyBody {
            url: page_url.to_string(),
        });
    }

    let title_hint = page.title.as_deref().or(feed_title);
    let summary = summarize(&page.text, title_hint, SUMMARY_SENTENCES);
    let keywords = keywords(&page.text, KEYWORD_COUNT);

    Ok(ArticleContent {
        title: page.title,
        full_text: page.text,
        lead_image_url: page.lead_image_url,
        summary,
        keywords,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://example.com/business/jobs-report").unwrap()
    }

    #[test]
    fn test_content_from_html() {
        let html = r#"<html><head><meta property="og:image" content="https://cdn.example.com/jobs.jpg"></head>
        <body><article>
          <p>Employers added far more jobs than expected last month, a strong sign for the economy.</p>
          <p>The unemployment rate fell to its lowest level in two years, the labor department said.</p>
          <p>Economists had warned that high interest rates would slow hiring across most industries.</p>
          <p>Wage growth also picked up, which could keep pressure on the central bank to hold rates.</p>
        </article></body></html>"#;

        let content = content_from_html(html, &url(), Some("Hiring surges")).unwrap();
        assert_eq!(content.title, None);
        assert_eq!(
            content.lead_image_url.as_deref(),
            Some("https://cdn.example.com/jobs.jpg")
        );
        assert!(content.full_text.starts_with("Employers added far more jobs"));
        assert!(!content.summary.is_empty());
        assert!(content.summary.len() < content.full_text.len());
        assert!(!content.keywords.is_empty());
        assert!(content.keywords.len() <= KEYWORD_COUNT);
    }

    #[test]
    fn test_page_without_body_is_an_error() {
        let html = "<html><body><nav><p>Home | News | Sport | Weather | Contact us | About</p></nav></body></html>";
        let err = content_from_html(html, &url(), None).unwrap_err();
        assert!(matches!(err, ResolveError::EmptyBody { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_article_is_an_error() {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        let resolver = HttpResolver::new(client);
        let item = FeedItem {
            title: "Unreachable".to_string(),
            link: "http://127.0.0.1:9/article".to_string(),
            source_name: "local".to_string(),
            published_at: String::new(),
        };
        let err = resolver.resolve(&item).await.unwrap_err();
        assert!(matches!(err, ResolveError::Download(_)));
    }
}
