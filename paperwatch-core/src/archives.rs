//! arXiv archive registry
//!
//! Known archive identifiers accepted by the catchup listing, so a typo in
//! the configuration fails at startup instead of producing an empty digest.

use serde::Serialize;

/// An arXiv archive
#[derive(Debug, Clone, Serialize)]
pub struct Archive {
    /// Identifier used in catchup URLs
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
}

/// Archives the catchup listing understands
pub static KNOWN_ARCHIVES: &[Archive] = &[
    Archive { id: "astro-ph", name: "Astrophysics" },
    Archive { id: "cond-mat", name: "Condensed Matter" },
    Archive { id: "cs", name: "Computer Science" },
    Archive { id: "econ", name: "Economics" },
    Archive { id: "eess", name: "Electrical Engineering and Systems Science" },
    Archive { id: "gr-qc", name: "General Relativity and Quantum Cosmology" },
    Archive { id: "hep-ex", name: "High Energy Physics - Experiment" },
    Archive { id: "hep-lat", name: "High Energy Physics - Lattice" },
    Archive { id: "hep-ph", name: "High Energy Physics - Phenomenology" },
    Archive { id: "hep-th", name: "High Energy Physics - Theory" },
    Archive { id: "math", name: "Mathematics" },
    Archive { id: "math-ph", name: "Mathematical Physics" },
    Archive { id: "nlin", name: "Nonlinear Sciences" },
    Archive { id: "nucl-ex", name: "Nuclear Experiment" },
    Archive { id: "nucl-th", name: "Nuclear Theory" },
    Archive { id: "physics", name: "Physics" },
    Archive { id: "q-bio", name: "Quantitative Biology" },
    Archive { id: "q-fin", name: "Quantitative Finance" },
    Archive { id: "quant-ph", name: "Quantum Physics" },
    Archive { id: "stat", name: "Statistics" },
];

/// Look up an archive by its identifier
pub fn find_archive(id: &str) -> Option<&'static Archive> {
    KNOWN_ARCHIVES.iter().find(|a| a.id == id)
}

/// Comma-separated list of valid identifiers, for error messages
pub fn known_archive_ids() -> String {
    KNOWN_ARCHIVES
        .iter()
        .map(|a| a.id)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_archive() {
        let archive = find_archive("quant-ph").unwrap();
        assert_eq!(archive.name, "Quantum Physics");
        assert!(find_archive("quant-phys").is_none());
    }

    #[test]
    fn test_known_archive_ids() {
        let ids = known_archive_ids();
        assert!(ids.contains("cond-mat"));
        assert!(ids.contains("quant-ph"));
    }
}
