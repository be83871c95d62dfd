//! Digest rendering
//!
//! Turns the day's relevant papers into a single message body, in two
//! flavors: Slack mrkdwn for posting and plain markdown for the summary file.

use chrono::{Datelike, NaiveDate};

use crate::{ScoredPaper, MAX_DISPLAY_AUTHORS};

/// Header line of every digest
pub const DIGEST_HEADER: &str = "📰 *Today's Relevant Papers*";

/// Body used when nothing cleared the threshold
pub const EMPTY_DIGEST_BODY: &str = "_No relevant papers today._";

const ENTRY_SEPARATOR: &str = "\n\n-----------------------\n\n";

/// The relevant papers of one run, ready for rendering
#[derive(Debug, Clone)]
pub struct Digest {
    /// Listing date the digest covers
    pub date: NaiveDate,
    papers: Vec<ScoredPaper>,
}

impl Digest {
    /// Keep only the relevant papers out of a scored listing
    pub fn from_scored(date: NaiveDate, scored: Vec<ScoredPaper>) -> Self {
        let papers = scored.into_iter().filter(|p| p.relevant).collect();
        Self { date, papers }
    }

    pub fn papers(&self) -> &[ScoredPaper] {
        &self.papers
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// File name for the saved summary, e.g. `14_3_2023.md`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.md",
            self.date.day(),
            self.date.month(),
            self.date.year()
        )
    }

    /// Render the Slack message body
    pub fn render_mrkdwn(&self, include_abstract: bool) -> String {
        let mut blocks = vec![DIGEST_HEADER.to_string()];

        if self.papers.is_empty() {
            blocks.push(EMPTY_DIGEST_BODY.to_string());
        }

        for paper in &self.papers {
            let mut sections = vec![
                format!("<{}|*{}*>", paper.record.abs_url(), paper.record.title),
                format!("Authors: {}", display_authors(&paper.record.authors)),
                format!(
                    "🗝️ _Keywords: {} (score {})_",
                    paper.matched.join(", "),
                    paper.score
                ),
            ];
            if include_abstract {
                sections.push(paper.record.abstract_text.clone());
            }
            blocks.push(sections.join("\n\n"));
        }

        blocks.join(ENTRY_SEPARATOR)
    }

    /// Render the markdown summary saved to disk
    pub fn render_markdown(&self, include_abstract: bool) -> String {
        let mut blocks = vec![format!("# 📰 Today's Relevant Papers ({})", self.date)];

        if self.papers.is_empty() {
            blocks.push(EMPTY_DIGEST_BODY.to_string());
        }

        for paper in &self.papers {
            let mut sections = vec![
                format!("## **[{}]({})**", paper.record.title, paper.record.abs_url()),
                format!("### _Authors: {}_", display_authors(&paper.record.authors)),
                format!(
                    "#### 🗝️ **Keywords**: {} (score {})",
                    paper.matched.join(", "),
                    paper.score
                ),
            ];
            if include_abstract {
                sections.push(paper.record.abstract_text.clone());
            }
            blocks.push(sections.join("\n\n"));
        }

        blocks.join(ENTRY_SEPARATOR)
    }
}

/// Join authors for display, truncating long lists to the first nine
/// plus the last name
fn display_authors(authors: &[String]) -> String {
    if authors.len() > MAX_DISPLAY_AUTHORS {
        let mut shown: Vec<&str> = authors[..MAX_DISPLAY_AUTHORS - 1]
            .iter()
            .map(String::as_str)
            .collect();
        shown.push("...");
        shown.push(authors[authors.len() - 1].as_str());
        shown.join(", ")
    } else {
        authors.join(", ")
    }
}
