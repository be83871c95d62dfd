//! Paper records and scoring results

use serde::{Deserialize, Serialize};

use crate::ABS_URL_BASE;

/// One paper from the daily listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    /// arXiv identifier, e.g. `2301.01234`
    pub id: String,
    /// Paper title
    pub title: String,
    /// Authors in listing order
    pub authors: Vec<String>,
    /// Abstract text
    pub abstract_text: String,
}

impl PaperRecord {
    /// Link to the abstract page
    pub fn abs_url(&self) -> String {
        format!("{}/{}", ABS_URL_BASE, self.id)
    }
}

/// A paper together with its relevance score
#[derive(Debug, Clone)]
pub struct ScoredPaper {
    pub record: PaperRecord,
    /// Sum of weights of the rules that matched
    pub score: i32,
    /// Patterns that matched, in rule order
    pub matched: Vec<String>,
    /// Whether the score cleared the threshold
    pub relevant: bool,
}
