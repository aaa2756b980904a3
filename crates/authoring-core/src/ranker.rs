//! Completion ranking.
//!
//! Terms are ordered by match class first and edit distance second:
//!
//! 1. [`MatchClass::Contains`]: the case-folded term text or category contains the query.
//!    Earlier match positions in the text sort first; category-only matches come last.
//! 2. [`MatchClass::Subsequence`]: the query's characters appear in order in the term text
//!    (`xr` in `x-ray`).
//! 3. [`MatchClass::Distance`]: neither; only the edit distance orders these.
//!
//! The empty query matches every term at offset 0, so it keeps index order.
//!
//! Edit distance is unit-cost Levenshtein between the case-folded query and term text. The sort
//! is stable, so equal keys keep index order and repeated queries return identical lists. The
//! list is truncated to the cap only after sorting.

use crate::terms::Term;

/// How a term matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchClass {
    /// Text or category contains the query as a substring.
    Contains,
    /// The query is a subsequence of the text.
    Subsequence,
    /// Scored by edit distance alone.
    Distance,
}

/// A term with its ranking score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCompletion {
    /// The candidate term.
    pub term: Term,
    /// Edit distance between query and term text (lower is better).
    pub score: usize,
    /// Primary sort key.
    pub class: MatchClass,
}

/// Rank `terms` against `query`, returning at most `cap` entries.
pub fn rank<'a, I>(query: &str, terms: I, cap: usize) -> Vec<RankedCompletion>
where
    I: IntoIterator<Item = &'a Term>,
{
    let query = query.to_lowercase();
    let mut ranked: Vec<(usize, RankedCompletion)> = terms
        .into_iter()
        .map(|term| score_term(&query, term))
        .collect();

    ranked.sort_by_key(|(match_pos, r)| (r.class, *match_pos, r.score));
    ranked.truncate(cap);
    ranked.into_iter().map(|(_, r)| r).collect()
}

/// Scores one term. The first element is the char offset of the query in the folded text; a
/// category-only match sorts after every text match, and the other classes report 0.
fn score_term(folded_query: &str, term: &Term) -> (usize, RankedCompletion) {
    let text = term.text.to_lowercase();
    let score = strsim::levenshtein(folded_query, &text);

    let (class, match_pos) = if let Some(byte_pos) = text.find(folded_query) {
        (MatchClass::Contains, text[..byte_pos].chars().count())
    } else if term.category.to_lowercase().contains(folded_query) {
        (MatchClass::Contains, usize::MAX)
    } else if is_subsequence(folded_query, &text) {
        (MatchClass::Subsequence, 0)
    } else {
        (MatchClass::Distance, 0)
    };

    (
        match_pos,
        RankedCompletion {
            term: term.clone(),
            score,
            class,
        },
    )
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars();
    needle.chars().all(|c| hay.any(|h| h == c))
}

/// Issues query sequence numbers and recognizes stale results.
///
/// A result is applied only if it carries the latest issued sequence number; anything older was
/// superseded by a newer query and is dropped.
#[derive(Debug, Clone, Default)]
pub struct QuerySequencer {
    latest: u64,
    dropped: u64,
}

/// Sequence number attached to a query and its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(pub u64);

impl QuerySequencer {
    /// Create a sequencer that has issued nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query, superseding every earlier one.
    pub fn issue(&mut self) -> QueryTicket {
        self.latest += 1;
        QueryTicket(self.latest)
    }

    /// Latest issued sequence number (0 before the first query).
    pub fn latest(&self) -> u64 {
        self.latest
    }

    /// Returns `true` if `ticket` is current; otherwise counts it as dropped.
    pub fn accept(&mut self, ticket: QueryTicket) -> bool {
        if ticket.0 == self.latest {
            true
        } else {
            self.dropped += 1;
            tracing::trace!(seq = ticket.0, latest = self.latest, "dropping stale query result");
            false
        }
    }

    /// Number of stale results dropped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::Term;

    fn words(texts: &[&str]) -> Vec<Term> {
        texts.iter().map(|t| Term::word(*t, "imaging")).collect()
    }

    fn texts(ranked: &[RankedCompletion]) -> Vec<&str> {
        ranked.iter().map(|r| r.term.text.as_str()).collect()
    }

    #[test]
    fn test_subsequence_beats_lower_distance() {
        let terms = vec![
            Term::word("x-ray", "radiology"),
            Term::word("MRI", "radiology"),
            Term::word("CT scan", "radiology"),
        ];
        let ranked = rank("xr", &terms, 5);
        assert_eq!(ranked[0].term.text, "x-ray");
        assert_eq!(ranked[0].class, MatchClass::Subsequence);
        assert_eq!(ranked[1].term.text, "MRI");
        assert_eq!(ranked[1].score, 2);
    }

    #[test]
    fn test_containment_matches_category_case_insensitively() {
        let terms = vec![
            Term::word("Consultation", "general"),
            Term::word("Bone density", "DEXA"),
        ];
        let ranked = rank("dexa", &terms, 5);
        assert_eq!(ranked[0].term.text, "Bone density");
        assert_eq!(ranked[0].class, MatchClass::Contains);
    }

    #[test]
    fn test_empty_query_keeps_index_order() {
        let terms = words(&["ultrasound", "CT", "MRI"]);
        let ranked = rank("", &terms, 10);
        assert!(ranked.iter().all(|r| r.class == MatchClass::Contains));
        assert_eq!(texts(&ranked), vec!["ultrasound", "CT", "MRI"]);
        assert_eq!(ranked[0].score, 10);
    }

    #[test]
    fn test_earlier_text_match_ranks_first() {
        let terms = vec![
            Term::word("Scan of chest", "imaging"),
            Term::word("chest x-ray", "imaging"),
            Term::word("Lungs", "chest"),
        ];
        let ranked = rank("chest", &terms, 5);
        assert_eq!(
            texts(&ranked),
            vec!["chest x-ray", "Scan of chest", "Lungs"]
        );
    }

    #[test]
    fn test_ties_keep_index_order() {
        let terms = words(&["abd", "abc", "abe"]);
        let ranked = rank("ab", &terms, 10);
        assert_eq!(texts(&ranked), vec!["abd", "abc", "abe"]);
    }

    #[test]
    fn test_cap_applies_after_sorting() {
        let mut terms = words(&["zzzz"; 999]);
        terms.push(Term::word("fever", "symptom"));
        let ranked = rank("fever", &terms, 5);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].term.text, "fever");
        assert_eq!(ranked[0].score, 0);
    }

    #[test]
    fn test_empty_terms_produce_empty_list() {
        assert!(rank("abc", std::iter::empty(), 5).is_empty());
    }

    #[test]
    fn test_sequencer_drops_superseded_results() {
        let mut seq = QuerySequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.accept(first));
        assert!(seq.accept(second));
        assert_eq!(seq.dropped(), 1);
        assert_eq!(seq.latest(), 2);
    }
}
