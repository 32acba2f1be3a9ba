use super::{SearchProvider, SearchRecord};
use crate::CoreError;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://export.arxiv.org/api/query";
pub const DEFAULT_MAX_RESULTS: usize = 10;

const ATOM_NS: &[u8] = b"http://www.w3.org/2005/Atom";

/// The arXiv export API (Atom feed over HTTP).
#[derive(Debug, Clone)]
pub struct Arxiv {
    api_url: String,
    max_results: usize,
}

impl Arxiv {
    pub fn new(api_url: impl Into<String>, max_results: usize) -> Self {
        Self {
            api_url: api_url.into(),
            max_results,
        }
    }
}

impl Default for Arxiv {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_MAX_RESULTS)
    }
}

/// Build the query URL: every keyword is required (`all:<kw>` joined by `+AND+`).
pub fn build_query_url(api_url: &str, keywords: &[String], max_results: usize) -> String {
    let query = keywords
        .iter()
        .map(|word| format!("all:{}", urlencoding::encode(word)))
        .collect::<Vec<_>>()
        .join("+AND+");
    format!("{api_url}?search_query={query}&start=0&max_results={max_results}")
}

impl SearchProvider for Arxiv {
    fn name(&self) -> &str {
        "arXiv"
    }

    fn search<'a>(
        &'a self,
        keywords: &'a [String],
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchRecord>, CoreError>> + Send + 'a>> {
        Box::pin(async move {
            let url = build_query_url(&self.api_url, keywords, self.max_results);
            tracing::debug!(url = %url, "querying arXiv");

            let resp = client.get(&url).timeout(timeout).send().await?;

            let status = resp.status();
            if !status.is_success() {
                tracing::warn!(status = status.as_u16(), "arXiv returned non-success status");
                return Err(CoreError::HttpStatus(status.as_u16()));
            }

            let body = resp.text().await?;
            let records = parse_feed(&body)?;
            tracing::debug!(count = records.len(), "parsed arXiv feed");
            Ok(records)
        })
    }
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    Id,
    Name,
}

/// Parse an arXiv Atom feed into search records, in document order.
///
/// Only elements in the Atom namespace are considered; arXiv extension
/// elements (`arxiv:affiliation`, `arxiv:comment`, ...) are skipped.
pub fn parse_feed(xml: &str) -> Result<Vec<SearchRecord>, CoreError> {
    use quick_xml::events::Event;
    use quick_xml::name::{Namespace, ResolveResult};
    use quick_xml::reader::NsReader;

    let mut reader = NsReader::from_str(xml);

    let mut records = Vec::new();
    let mut in_entry = false;
    let mut in_author = false;
    let mut field: Option<Field> = None;

    let mut title: Option<String> = None;
    let mut id: Option<String> = None;
    let mut name: Option<String> = None;
    let mut authors: Vec<String> = Vec::new();

    let mut buf = Vec::new();

    loop {
        let (ns, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| CoreError::Xml(e.to_string()))?;
        let is_atom = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == ATOM_NS);

        match event {
            Event::Start(ref e) if is_atom => match e.local_name().as_ref() {
                b"entry" => {
                    in_entry = true;
                    title = None;
                    id = None;
                    authors.clear();
                }
                b"title" if in_entry && !in_author => {
                    field = Some(Field::Title);
                    title = Some(String::new());
                }
                b"id" if in_entry && !in_author => {
                    field = Some(Field::Id);
                    id = Some(String::new());
                }
                b"author" if in_entry => {
                    in_author = true;
                    name = None;
                }
                b"name" if in_author => {
                    field = Some(Field::Name);
                    name = Some(String::new());
                }
                _ => {}
            },
            Event::Empty(ref e) if is_atom => match e.local_name().as_ref() {
                b"title" if in_entry && !in_author => title = Some(String::new()),
                b"id" if in_entry && !in_author => id = Some(String::new()),
                b"name" if in_author => name = Some(String::new()),
                _ => {}
            },
            Event::Text(ref e) => {
                if let Some(f) = field {
                    let text = e.unescape().map_err(|e| CoreError::Xml(e.to_string()))?;
                    push_text(f, &text, &mut title, &mut id, &mut name);
                }
            }
            Event::CData(ref e) => {
                if let Some(f) = field {
                    let text = String::from_utf8_lossy(e);
                    push_text(f, &text, &mut title, &mut id, &mut name);
                }
            }
            Event::End(ref e) if is_atom => match e.local_name().as_ref() {
                b"title" | b"id" | b"name" => field = None,
                b"author" if in_author => {
                    let full = name.take().ok_or(CoreError::MissingField("author/name"))?;
                    authors.push(full.trim().to_string());
                    in_author = false;
                }
                b"entry" if in_entry => {
                    let title = title.take().ok_or(CoreError::MissingField("title"))?;
                    let id = id.take().ok_or(CoreError::MissingField("id"))?;
                    records.push(SearchRecord {
                        title: title.trim().to_string(),
                        id: id.trim().to_string(),
                        authors: std::mem::take(&mut authors),
                    });
                    in_entry = false;
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}

fn push_text(
    field: Field,
    text: &str,
    title: &mut Option<String>,
    id: &mut Option<String>,
    name: &mut Option<String>,
) {
    let target = match field {
        Field::Title => title,
        Field::Id => id,
        Field::Name => name,
    };
    if let Some(s) = target {
        s.push_str(text);
    }
}
