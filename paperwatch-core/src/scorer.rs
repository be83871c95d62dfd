//! Relevance scorer
//!
//! Sums the weights of every keyword rule that matches a paper's title or
//! author list. A rule counts once per paper even when it hits both the title
//! and an author, so a favorite author whose name is also a topic keyword does
//! not get double credit.

use tracing::debug;

use crate::{KeywordTable, PaperRecord, ScoredPaper};

/// Score one paper against the keyword table.
///
/// Returns the total weight and the patterns that matched, in rule order.
pub fn score(paper: &PaperRecord, table: &KeywordTable) -> (i32, Vec<String>) {
    let mut total = 0;
    let mut matched = Vec::new();

    for rule in table.rules() {
        let hit = rule.matches(&paper.title)
            || paper.authors.iter().any(|a| rule.matches(a));
        if hit {
            total += rule.weight;
            matched.push(rule.pattern.clone());
        }
    }

    (total, matched)
}

/// A paper is relevant iff its score strictly exceeds the threshold.
/// Scoring exactly at the threshold is not enough.
pub fn classify(score: i32, threshold: i32) -> bool {
    score > threshold
}

/// Score a whole listing, tagging each paper with its classification
pub fn score_all(
    papers: Vec<PaperRecord>,
    table: &KeywordTable,
    threshold: i32,
) -> Vec<ScoredPaper> {
    papers
        .into_iter()
        .map(|record| {
            let (total, matched) = score(&record, table);
            let relevant = classify(total, threshold);
            if relevant {
                debug!("relevant ({}): {}", total, record.title);
            }
            ScoredPaper {
                record,
                score: total,
                matched,
                relevant,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeywordTable, MatchMode};
    use std::path::Path;

    fn table(contents: &str) -> KeywordTable {
        KeywordTable::parse(contents, MatchMode::Substring, Path::new("keywords.csv")).unwrap()
    }

    fn paper(title: &str, authors: &[&str]) -> PaperRecord {
        PaperRecord {
            id: "2301.00001".to_string(),
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            abstract_text: String::new(),
        }
    }

    #[test]
    fn test_worked_example() {
        // rules [("quantum", 3), ("Alice Smith", 5)], threshold 4
        let table = table("quantum, 3\nAlice Smith, 5\n");

        let (s, matched) = score(&paper("Quantum entanglement", &["Alice Smith"]), &table);
        assert_eq!(s, 8);
        assert_eq!(matched, vec!["quantum", "Alice Smith"]);
        assert!(classify(s, 4));

        let (s, _) = score(&paper("Quantum entanglement", &["Bob Lee"]), &table);
        assert_eq!(s, 3);
        assert!(!classify(s, 4));
    }

    #[test]
    fn test_rule_counted_once_across_fields() {
        // "quantum" appears in the title and in an author name; weight once
        let table = table("quantum, 3\n");
        let (s, matched) = score(&paper("Quantum computing", &["J. Quantum"]), &table);
        assert_eq!(s, 3);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_empty_rule_set_scores_zero() {
        let table = table("# no rules\n");
        let (s, matched) = score(&paper("Quantum entanglement", &["Alice Smith"]), &table);
        assert_eq!(s, 0);
        assert!(matched.is_empty());
        // Never relevant for any threshold >= 0
        assert!(!classify(s, 0));
        assert!(!classify(s, 3));
    }

    #[test]
    fn test_negative_weights_subtract() {
        let table = table("quantum, 3\nreview, -5\n");
        let (s, _) = score(&paper("A review of quantum sensing", &[]), &table);
        assert_eq!(s, -2);
        assert!(!classify(s, 0));
    }

    #[test]
    fn test_threshold_boundary_is_strict() {
        assert!(!classify(4, 4));
        assert!(classify(5, 4));
        // Holds at zero as well
        assert!(!classify(0, 0));
    }

    #[test]
    fn test_classify_monotonic_in_score() {
        let threshold = 4;
        let mut last = false;
        for s in 0..10 {
            let now = classify(s, threshold);
            // Once relevant, stays relevant as the score grows
            assert!(!last || now);
            last = now;
        }
    }

    #[test]
    fn test_score_all_tags_relevance() {
        let table = table("quantum, 3\nAlice Smith, 5\n");
        let papers = vec![
            paper("Quantum entanglement", &["Alice Smith"]),
            paper("Quantum entanglement", &["Bob Lee"]),
            paper("Soft matter rheology", &["Carol Diaz"]),
        ];

        let scored = score_all(papers, &table, 4);
        assert_eq!(scored.len(), 3);
        assert!(scored[0].relevant);
        assert!(!scored[1].relevant);
        assert!(!scored[2].relevant);
        assert_eq!(scored[2].score, 0);
    }
}
