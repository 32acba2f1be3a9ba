use std::time::Duration;

use crate::citation::Citation;
use crate::db::SearchProvider;
use crate::matching::{MATCH_CUTOFF, best_match};
use crate::text_utils::{extract_keywords, normalize_title, strip_latex_math};
use crate::{Config, CoreError, Lookup};

/// Look up a paper title and return its citation token.
///
/// Upstream failures (network, HTTP status, feed parsing) and a blank author
/// name on the winning record are returned as errors; a weak or missing match
/// is `Ok(Lookup::NoMatch)`.
pub async fn find_citation(
    title: &str,
    provider: &dyn SearchProvider,
    client: &reqwest::Client,
    config: &Config,
) -> Result<Lookup, CoreError> {
    let stripped = strip_latex_math(title);
    let keywords = extract_keywords(&stripped);
    if keywords.is_empty() {
        tracing::debug!(title, "no keywords, skipping search");
        return Ok(Lookup::NoMatch);
    }
    tracing::debug!(provider = provider.name(), ?keywords, "searching");

    let records = provider
        .search(&keywords, client, Duration::from_secs(config.timeout_secs))
        .await?;

    let target = normalize_title(&stripped);
    let candidates: Vec<String> = records
        .iter()
        .map(|r| normalize_title(r.title.trim()))
        .collect();

    match best_match(&target, &candidates, MATCH_CUTOFF) {
        Some(m) => {
            let citation = Citation::from_record(&records[m.index])?;
            tracing::info!(ratio = m.ratio, citation = %citation, "matched");
            Ok(Lookup::Found(citation))
        }
        None => Ok(Lookup::NoMatch),
    }
}
