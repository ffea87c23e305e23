//! Main-content extraction from article HTML.
//!
//! The body is taken from the most text-heavy content root (`article`,
//! `[itemprop=articleBody]`, `main`, `[role=main]`, falling back to `body`).
//! Paragraphs inside navigation or page chrome are ignored, as are short
//! fragments such as bylines and captions.

use crate::text::normalize_whitespace;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Paragraphs shorter than this (in characters) are treated as page chrome.
pub const MIN_PARAGRAPH_CHARS: usize = 40;

const BOILERPLATE_TAGS: &[&str] = &["nav", "footer", "aside", "header", "form", "figcaption"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static CONTENT_ROOTS: Lazy<Selector> =
    Lazy::new(|| selector(r#"article, [itemprop="articleBody"], main, [role="main"]"#));
static BODY: Lazy<Selector> = Lazy::new(|| selector("body"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
static IMAGE_META: Lazy<Selector> = Lazy::new(|| {
    selector(r#"meta[property="og:image"], meta[name="twitter:image"], meta[property="twitter:image"]"#)
});
static IMAGE_LINK: Lazy<Selector> = Lazy::new(|| selector(r#"link[rel="image_src"]"#));
static IMG: Lazy<Selector> = Lazy::new(|| selector("img[src]"));
static OG_TITLE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:title"]"#));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));

/// What could be pulled out of one article page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedPage {
    pub title: Option<String>,
    /// Body paragraphs separated by blank lines; empty when nothing qualified.
    pub text: String,
    pub lead_image_url: Option<String>,
}

/// Extract title, body text and lead image from an HTML document.
///
/// `page_url` is the final URL the page was served from; relative image
/// sources are resolved against it.
pub fn extract_page(html: &str, page_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);
    let root = content_root(&document);

    let text = root
        .map(|r| paragraphs(r).join("\n\n"))
        .unwrap_or_default();

    ExtractedPage {
        title: page_title(&document),
        text,
        lead_image_url: lead_image(&document, root, page_url),
    }
}

fn content_root(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&CONTENT_ROOTS)
        .map(|el| (paragraph_chars(el), el))
        .filter(|(chars, _)| *chars > 0)
        .max_by_key(|(chars, _)| *chars)
        .map(|(_, el)| el)
        .or_else(|| document.select(&BODY).next())
}

fn paragraph_chars(root: ElementRef<'_>) -> usize {
    paragraphs(root).iter().map(|p| p.chars().count()).sum()
}

fn paragraphs(root: ElementRef<'_>) -> Vec<String> {
    root.select(&PARAGRAPH)
        .filter(|p| !in_boilerplate(p))
        .map(|p| normalize_whitespace(&p.text().collect::<String>()))
        .filter(|t| t.chars().count() >= MIN_PARAGRAPH_CHARS)
        .unique()
        .collect()
}

fn in_boilerplate(el: &ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| BOILERPLATE_TAGS.contains(&a.value().name()))
}

fn page_title(document: &Html) -> Option<String> {
    document
        .select(&OG_TITLE)
        .find_map(|m| m.value().attr("content"))
        .map(normalize_whitespace)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            document
                .select(&TITLE)
                .next()
                .map(|t| normalize_whitespace(&t.text().collect::<String>()))
                .filter(|t| !t.is_empty())
        })
}

fn lead_image(document: &Html, root: Option<ElementRef<'_>>, page_url: &Url) -> Option<String> {
    let usable = |src: &&str| !src.trim().is_empty() && !src.trim_start().starts_with("data:");

    let src = document
        .select(&IMAGE_META)
        .filter_map(|m| m.value().attr("content"))
        .find(usable)
        .or_else(|| {
            document
                .select(&IMAGE_LINK)
                .filter_map(|l| l.value().attr("href"))
                .find(usable)
        })
        .or_else(|| {
            root.and_then(|r| {
                r.select(&IMG)
                    .filter_map(|i| i.value().attr("src"))
                    .find(usable)
            })
        })?;

    page_url.join(src.trim()).ok().map(|u| u.to_string())
}
