use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    index::RuleIndex,
    matcher::{ScoredKey, Scorer},
};

/// Default number of ranked candidates considered per query.
pub const DEFAULT_TOP_N: usize = 3;

/// Candidates must score strictly above this to be included.
pub const DEFAULT_MIN_SCORE: f32 = 60.0;

/// Tunable knobs for a single search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub top_n: usize,
    pub min_score: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// A ranked, above-threshold candidate resolved against the index.
#[derive(Debug, Clone)]
pub struct Match {
    pub key: String,
    pub score: f32,
    pub path: PathBuf,
}

/// Full query pipeline: rank, filter, retrieve, assemble.
///
/// The result is always a single human-readable string; a query that
/// clears nothing (including an empty or whitespace-only query) yields
/// the no-results message naming the original query.
pub fn execute_search(
    query: &str,
    index: &RuleIndex,
    scorer: &dyn Scorer,
    options: &SearchOptions,
) -> String {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        // A blank query matches nothing; skip ranking entirely.
        return no_results(query);
    }

    let matches = rank_matches(trimmed, index, scorer, options);
    tracing::debug!(query = trimmed, matches = matches.len(), "query ranked");

    if matches.is_empty() {
        return no_results(query);
    }
    render_report(&matches)
}

/// Rank index keys against `query` and keep high-confidence candidates.
///
/// Touches no files; document retrieval happens in [`render_report`].
pub fn rank_matches(
    query: &str,
    index: &RuleIndex,
    scorer: &dyn Scorer,
    options: &SearchOptions,
) -> Vec<Match> {
    let candidates: Vec<&str> = index.keys().collect();

    scorer
        .rank(query, &candidates, options.top_n)
        .into_iter()
        .filter(|scored| scored.score > options.min_score)
        .filter_map(|ScoredKey { key, score }| {
            index.get(&key).map(|path| Match {
                path: path.to_path_buf(),
                key,
                score,
            })
        })
        .collect()
}

/// Load each match and assemble the combined text report.
///
/// Retrieval is isolated per candidate: a missing or malformed file
/// turns into a failure note in that candidate's block instead of
/// sinking the other matches.
pub fn render_report(matches: &[Match]) -> String {
    let blocks: Vec<String> = matches
        .iter()
        .map(|m| {
            let header = format!(
                "--- MATCH: {} ({}) ---",
                title_case(&m.key),
                category_of(&m.path)
            );
            let body = match load_document(&m.path) {
                Ok(pretty) => pretty,
                Err(e) => format!("[document unavailable: {e}]"),
            };
            format!("{header}\n{body}")
        })
        .collect();

    blocks.join("\n\n")
}

fn no_results(query: &str) -> String {
    format!("No rules found matching '{query}'.")
}

/// Read and re-serialize one document as indented JSON.
///
/// Documents are opaque records: the content passes through unchanged
/// apart from formatting.
fn load_document(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| {
            Error::MalformedDocument {
                path: path.to_path_buf(),
                source,
            }
        })?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Coarse category label: the document's immediate parent directory.
pub fn category_of(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "uncategorized".to_string())
}

/// Human-case a rule key for report headers: the first letter of every
/// word is uppercased, the rest lowered.
fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_boundary = true;

    for c in key.chars() {
        if c.is_alphabetic() {
            if at_boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_boundary = false;
        } else {
            out.push(c);
            at_boundary = true;
        }
    }

    out
}
