//! Fuzzy ranking of rule keys against free-text queries.

/// A candidate key with its similarity score on a 0-100 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredKey {
    pub key: String,
    pub score: f32,
}

/// Ranks index keys against a free-text query.
///
/// The concrete scoring algorithm sits behind this trait so it can be
/// swapped without touching the search pipeline.
pub trait Scorer {
    /// Return the best `top_n` candidates, highest score first.
    fn rank(
        &self,
        query: &str,
        candidates: &[&str],
        top_n: usize,
    ) -> Vec<ScoredKey>;
}

/// Jaro-Winkler similarity via the `strsim` crate, scaled to 0-100.
///
/// Comparison is case-insensitive. Equal scores fall back to key order
/// so repeated queries rank identically.
#[derive(Debug, Default, Clone, Copy)]
pub struct JaroWinklerScorer;

impl Scorer for JaroWinklerScorer {
    fn rank(
        &self,
        query: &str,
        candidates: &[&str],
        top_n: usize,
    ) -> Vec<ScoredKey> {
        let needle = query.to_lowercase();

        let mut scored: Vec<ScoredKey> = candidates
            .iter()
            .map(|candidate| {
                let similarity =
                    strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                ScoredKey {
                    key: (*candidate).to_string(),
                    score: (similarity * 100.0) as f32,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.key.cmp(&b.key))
        });
        scored.truncate(top_n);
        scored
    }
}
