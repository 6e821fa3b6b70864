use std::collections::HashMap;

/// Known platform names (lower-cased) and their TMDb watch-provider ids
const KNOWN_PROVIDERS: &[(&str, u32)] = &[
    ("netflix", 8),
    ("amazon prime video", 9),
    ("prime video", 9),
    ("amazon video", 9),
    ("disney plus", 337),
    ("disney+", 337),
    ("max", 1899),
    ("hbo max", 384),
    ("apple tv plus", 350),
    ("appletv+", 350),
    ("apple tv+", 350),
    ("globoplay", 307),
    ("star plus", 619),
    ("star+", 619),
    ("claro video", 167),
    ("looke", 484),
    ("paramount plus", 531),
    ("paramount+", 531),
];

/// Lookup from user-facing streaming service names to catalog provider ids
#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    providers: HashMap<String, u32>,
}

impl Default for ProviderDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderDirectory {
    /// Creates the directory of known streaming services
    pub fn new() -> Self {
        Self::with_entries(KNOWN_PROVIDERS.iter().map(|(name, id)| (name.to_string(), *id)))
    }

    pub fn with_entries(entries: impl IntoIterator<Item = (String, u32)>) -> Self {
        Self {
            providers: entries
                .into_iter()
                .map(|(name, id)| (name.trim().to_lowercase(), id))
                .collect(),
        }
    }

    /// Resolves a platform name, ignoring case and surrounding whitespace
    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.providers.get(&name.trim().to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_provider() {
        let directory = ProviderDirectory::new();
        assert_eq!(directory.resolve("netflix"), Some(8));
        assert_eq!(directory.resolve("  Disney+ "), Some(337));
        assert_eq!(directory.resolve("Prime Video"), Some(9));
    }

    #[test]
    fn test_aliases_share_id() {
        let directory = ProviderDirectory::new();
        assert_eq!(directory.resolve("star plus"), directory.resolve("star+"));
        assert_eq!(directory.resolve("apple tv+"), Some(350));
    }

    #[test]
    fn test_unknown_provider() {
        let directory = ProviderDirectory::new();
        assert_eq!(directory.resolve("netflx"), None);
        assert_eq!(directory.resolve(""), None);
    }
}
