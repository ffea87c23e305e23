//! RSS document parsing.
//!
//! Walks the document with `quick-xml`'s streaming reader and turns every
//! `<item>` into a [`FeedItem`]. Only unprefixed elements directly under
//! `<item>` are read, so extensions such as `<media:title>` or `<atom:link>`
//! never leak into the item, and the first occurrence of a field wins.
//!
//! Degradation is per entry: an item without a usable title or link is
//! skipped and parsing carries on. A syntax error stops the walk, keeping
//! every item completed before it.

use crate::models::FeedItem;
use crate::text::normalize_whitespace;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Source,
    PubDate,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"source" => Some(Field::Source),
            b"pubDate" => Some(Field::PubDate),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct EntryDraft {
    title: String,
    link: String,
    source: String,
    pub_date: String,
    completed: Vec<Field>,
}

impl EntryDraft {
    fn push(&mut self, field: Field, text: &str) {
        if self.completed.contains(&field) {
            return;
        }
        let target = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Source => &mut self.source,
            Field::PubDate => &mut self.pub_date,
        };
        target.push_str(text);
    }

    /// Later elements of the same kind are ignored once `field` has closed.
    fn complete(&mut self, field: Field) {
        if !self.completed.contains(&field) {
            self.completed.push(field);
        }
    }

    fn into_item(self) -> Option<FeedItem> {
        let title = normalize_whitespace(&self.title);
        let link = self.link.trim();
        if title.is_empty() || link.is_empty() {
            return None;
        }
        let url = Url::parse(link)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))?;

        let source = normalize_whitespace(&self.source);
        let source_name = if source.is_empty() {
            domain_label(&url)
        } else {
            source
        };

        Some(FeedItem {
            title,
            link: link.to_string(),
            source_name,
            published_at: self.pub_date.trim().to_string(),
        })
    }
}

/// Second-level labels that sit under a country code, as in `bbc.co.uk`.
const GENERIC_SECOND_LEVEL: &[&str] = &["co", "com", "org", "net", "gov", "ac", "edu"];

/// The label before the public suffix, e.g. "reuters" for
/// `https://www.reuters.com/world` and "bbc" for `https://www.bbc.co.uk`.
fn domain_label(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    let parts: Vec<&str> = host.split('.').collect();
    match parts.len() {
        0 | 1 => host.to_string(),
        n if n >= 3 && GENERIC_SECOND_LEVEL.contains(&parts[n - 2]) && parts[n - 1].len() == 2 => {
            parts[n - 3].to_string()
        }
        n => parts[n - 2].to_string(),
    }
}

/// Parse a raw RSS document into feed items, in document order.
pub fn parse_items(xml: &str) -> Vec<FeedItem> {
    let mut reader = Reader::from_str(xml);
    let mut items = Vec::new();
    let mut skipped = 0usize;
    let mut draft: Option<EntryDraft> = None;
    let mut field: Option<Field> = None;
    // element depth below the open <item>
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if draft.is_some() {
                    depth += 1;
                    field = if depth == 1 {
                        Field::from_tag(e.name().as_ref())
                    } else {
                        None
                    };
                } else if e.name().as_ref() == b"item" {
                    draft = Some(EntryDraft::default());
                    field = None;
                    depth = 0;
                }
            }
            Ok(Event::End(e)) => {
                if depth > 0 {
                    if let (Some(entry), Some(f), 1) = (draft.as_mut(), field, depth) {
                        entry.complete(f);
                    }
                    depth -= 1;
                } else if e.name().as_ref() == b"item" {
                    if let Some(entry) = draft.take() {
                        match entry.into_item() {
                            Some(item) => items.push(item),
                            None => {
                                skipped += 1;
                                debug!(
                                    position = items.len() + skipped,
                                    "Skipping feed entry without usable title or link"
                                );
                            }
                        }
                    }
                }
                field = None;
            }
            Ok(Event::Text(e)) => {
                if let (Some(entry), Some(f)) = (draft.as_mut(), field) {
                    let raw = String::from_utf8_lossy(e.as_ref());
                    match unescape(&raw) {
                        Ok(text) => entry.push(f, &text),
                        Err(_) => entry.push(f, &raw),
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(entry), Some(f)) = (draft.as_mut(), field) {
                    entry.push(f, &String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let (Some(entry), Some(f)) = (draft.as_mut(), field) {
                    let reference = format!("&{};", String::from_utf8_lossy(e.as_ref()));
                    match unescape(&reference) {
                        Ok(text) => entry.push(f, &text),
                        Err(_) => entry.push(f, &reference),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(
                    error = %e,
                    position = reader.buffer_position(),
                    parsed = items.len(),
                    "Feed document is malformed; keeping entries parsed so far"
                );
                break;
            }
            _ => {}
        }
    }

    info!(count = items.len(), skipped, "Parsed feed items");
    items
}
