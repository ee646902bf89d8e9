//! package.json dependency sections

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four dependency maps of a package.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencySection {
    #[serde(rename = "dependencies")]
    Dependencies,
    #[serde(rename = "devDependencies")]
    DevDependencies,
    #[serde(rename = "peerDependencies")]
    PeerDependencies,
    #[serde(rename = "optionalDependencies")]
    OptionalDependencies,
}

impl DependencySection {
    /// All sections, in the order they are scanned and searched
    pub fn all() -> &'static [DependencySection] {
        &[
            DependencySection::Dependencies,
            DependencySection::DevDependencies,
            DependencySection::PeerDependencies,
            DependencySection::OptionalDependencies,
        ]
    }

    /// The JSON key of this section
    pub fn key(&self) -> &'static str {
        match self {
            DependencySection::Dependencies => "dependencies",
            DependencySection::DevDependencies => "devDependencies",
            DependencySection::PeerDependencies => "peerDependencies",
            DependencySection::OptionalDependencies => "optionalDependencies",
        }
    }
}

impl fmt::Display for DependencySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order() {
        let keys: Vec<_> = DependencySection::all().iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            vec![
                "dependencies",
                "devDependencies",
                "peerDependencies",
                "optionalDependencies"
            ]
        );
    }

    #[test]
    fn test_section_serde_uses_json_key() {
        let json = serde_json::to_string(&DependencySection::DevDependencies).unwrap();
        assert_eq!(json, "\"devDependencies\"");
        let parsed: DependencySection = serde_json::from_str("\"peerDependencies\"").unwrap();
        assert_eq!(parsed, DependencySection::PeerDependencies);
    }

    #[test]
    fn test_section_display() {
        assert_eq!(
            DependencySection::OptionalDependencies.to_string(),
            "optionalDependencies"
        );
    }
}
