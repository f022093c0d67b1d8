use std::collections::HashSet;
use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::faq::FaqCatalog;
use crate::models::FaqEntry;

/// Matches below this confidence are treated as no-match and routed to the
/// fallback backend.
pub const MIN_MATCH_CONFIDENCE: u8 = 25;

/// Per-token weights. A query token found in the entry's question outscores
/// one found only in the category or answer body.
const QUESTION_WEIGHT: u32 = 3;
const CATEGORY_WEIGHT: u32 = 2;
const ANSWER_WEIGHT: u32 = 1;

/// Tokens carrying no matching signal on their own. A query made up entirely
/// of stop words falls back to its unfiltered tokens.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "am", "was", "do", "does", "did", "i", "my", "me", "you",
    "your", "of", "to", "in", "on", "for", "it", "and", "or", "what", "how", "when", "where",
    "can", "will", "please",
];

/// The best catalog entry for a query, with a 0-100 confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqMatch {
    pub confidence: u8,
    pub entry: FaqEntry,
}

/// Deterministic lexical matcher over a fixed [`FaqCatalog`].
///
/// Scoring is pure token overlap: each unique query token contributes the
/// weight of the best field it appears in (question > category > answer), and
/// the sum is normalized against an all-question-hits score. An exact
/// normalized question match short-circuits to 100. Ties keep the earliest
/// catalog entry, so results are repeatable for a fixed catalog and query.
#[derive(Clone)]
pub struct FaqMatcher {
    catalog: Arc<FaqCatalog>,
    entries: Vec<IndexedEntry>,
}

/// Pre-tokenized catalog entry. Built once at matcher construction so
/// per-query work is a set lookup per token.
#[derive(Debug, Clone)]
struct IndexedEntry {
    normalized_question: String,
    question_tokens: HashSet<String>,
    category_tokens: HashSet<String>,
    answer_tokens: HashSet<String>,
}

impl FaqMatcher {
    pub fn new(catalog: Arc<FaqCatalog>) -> Self {
        let entries = catalog
            .entries()
            .iter()
            .map(|entry| IndexedEntry {
                normalized_question: normalize(&entry.question),
                question_tokens: tokenize(&entry.question).into_iter().collect(),
                category_tokens: tokenize(&entry.category).into_iter().collect(),
                answer_tokens: tokenize(&entry.answer).into_iter().collect(),
            })
            .collect();

        Self { catalog, entries }
    }

    pub fn catalog(&self) -> &FaqCatalog {
        &self.catalog
    }

    /// Score every catalog entry against `query` and return the best match,
    /// or `None` when the query is blank or nothing clears
    /// [`MIN_MATCH_CONFIDENCE`].
    pub fn best_match(&self, query: &str) -> Option<FaqMatch> {
        if query.trim().is_empty() {
            return None;
        }

        let query_tokens = query_tokens(query);
        if query_tokens.is_empty() {
            return None;
        }
        let normalized_query = normalize(query);

        let mut best: Option<(usize, u8)> = None;
        for (index, indexed) in self.entries.iter().enumerate() {
            let confidence = score_entry(indexed, &query_tokens, &normalized_query);
            // Strictly greater: earlier entries win ties.
            if best.map_or(true, |(_, best_confidence)| confidence > best_confidence) {
                best = Some((index, confidence));
            }
        }

        let (index, confidence) = best?;
        if confidence < MIN_MATCH_CONFIDENCE {
            return None;
        }

        Some(FaqMatch {
            confidence,
            entry: self.catalog.entries()[index].clone(),
        })
    }
}

fn score_entry(entry: &IndexedEntry, query_tokens: &[String], normalized_query: &str) -> u8 {
    if entry.normalized_question == normalized_query {
        return 100;
    }

    let mut raw = 0u32;
    for token in query_tokens {
        if entry.question_tokens.contains(token) {
            raw += QUESTION_WEIGHT;
        } else if entry.category_tokens.contains(token) {
            raw += CATEGORY_WEIGHT;
        } else if entry.answer_tokens.contains(token) {
            raw += ANSWER_WEIGHT;
        }
    }

    let max_raw = QUESTION_WEIGHT * query_tokens.len() as u32;
    if max_raw == 0 {
        return 0;
    }

    // Round half up so a 3-of-4 question hit lands on exactly 75.
    ((raw * 100 + max_raw / 2) / max_raw).min(100) as u8
}

/// Unique, stop-word-filtered query tokens in first-seen order. Falls back to
/// the unfiltered tokens when the query is all stop words, so "what is it"
/// still scores rather than matching nothing.
fn query_tokens(query: &str) -> Vec<String> {
    let all: Vec<String> = dedup(tokenize(query));
    let filtered: Vec<String> = all
        .iter()
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .cloned()
        .collect();

    if filtered.is_empty() {
        all
    } else {
        filtered
    }
}

fn dedup(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|word| word.to_lowercase())
        .collect()
}

fn normalize(text: &str) -> String {
    tokenize(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FaqEntry;
    use pretty_assertions::assert_eq;

    fn entry(question: &str, answer: &str, category: &str) -> FaqEntry {
        FaqEntry {
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.to_string(),
        }
    }

    fn matcher(entries: Vec<FaqEntry>) -> FaqMatcher {
        FaqMatcher::new(Arc::new(FaqCatalog::from_entries(entries).expect("catalog")))
    }

    fn super_matcher() -> FaqMatcher {
        matcher(vec![entry(
            "What is super?",
            "A retirement savings vehicle.",
            "Superannuation Basics",
        )])
    }

    #[test]
    fn exact_question_scores_100() {
        let m = super_matcher();
        let hit = m.best_match("What is super?").expect("match");
        assert_eq!(hit.confidence, 100);
        assert_eq!(hit.entry.answer, "A retirement savings vehicle.");
    }

    #[test]
    fn exact_match_ignores_case_and_punctuation() {
        let m = super_matcher();
        let hit = m.best_match("what is SUPER").expect("match");
        assert_eq!(hit.confidence, 100);
    }

    #[test]
    fn blank_query_is_no_match() {
        let m = super_matcher();
        assert!(m.best_match("").is_none());
        assert!(m.best_match("   \t  ").is_none());
    }

    #[test]
    fn gibberish_is_no_match() {
        let m = super_matcher();
        assert!(m.best_match("xyzzy unrelated gibberish").is_none());
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let m = super_matcher();
        let first = m.best_match("how does super work");
        for _ in 0..10 {
            assert_eq!(m.best_match("how does super work"), first);
        }
    }

    #[test]
    fn three_of_four_question_tokens_score_exactly_75() {
        let m = matcher(vec![entry(
            "alpha beta gamma delta",
            "unrelated body text",
            "misc",
        )]);
        let hit = m.best_match("alpha beta gamma quux").expect("match");
        assert_eq!(hit.confidence, 75);
    }

    #[test]
    fn question_hits_outscore_answer_hits() {
        let m = matcher(vec![
            entry("transfer limits", "daily cap applies", "payments"),
            entry("opening hours", "transfer limits are described elsewhere", "branches"),
        ]);
        let hit = m.best_match("transfer limits").expect("match");
        assert_eq!(hit.entry.question, "transfer limits");
        assert_eq!(hit.confidence, 100);
    }

    #[test]
    fn ties_keep_the_earliest_entry() {
        let m = matcher(vec![
            entry("joint accounts", "first answer", "accounts"),
            entry("joint accounts", "second answer", "accounts"),
        ]);
        let hit = m.best_match("tell me about joint accounts").expect("match");
        assert_eq!(hit.entry.answer, "first answer");
    }

    #[test]
    fn below_floor_is_no_match() {
        // One of five tokens hits the answer only: 1/15 ~= 7, under the floor.
        let m = matcher(vec![entry(
            "card activation",
            "use the portal menu",
            "cards",
        )]);
        assert!(m
            .best_match("zz yy xx ww portal")
            .is_none());
    }

    #[test]
    fn stop_word_only_query_uses_unfiltered_tokens() {
        let m = matcher(vec![entry("what is it", "a thing", "misc")]);
        let hit = m.best_match("what is it").expect("match");
        assert_eq!(hit.confidence, 100);
    }

    #[test]
    fn duplicate_query_tokens_count_once() {
        let m = matcher(vec![entry("fees", "fees are listed", "Fees & Charges")]);
        let once = m.best_match("fees").expect("match");
        let repeated = m.best_match("fees fees fees").expect("match");
        assert_eq!(once.confidence, repeated.confidence);
    }

    #[test]
    fn confidence_stays_in_range_on_bundled_catalog() {
        let m = FaqMatcher::new(Arc::new(FaqCatalog::bundled().expect("catalog")));
        for probe in ["super", "fees on my account", "reset password", "statement"] {
            if let Some(hit) = m.best_match(probe) {
                assert!(hit.confidence <= 100, "probe {probe} out of range");
                assert!(hit.confidence >= MIN_MATCH_CONFIDENCE);
            }
        }
    }
}
