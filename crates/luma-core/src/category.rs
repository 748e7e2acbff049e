//! Package categories and the legacy alias table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::name::PackageName;

/// The storefront a package is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Registry,
    AssetsStore,
}

/// Every accepted input spelling, canonical names first, then legacy aliases.
const CATEGORY_ALIASES: &[(&str, Category)] = &[
    ("registry", Category::Registry),
    ("assets-store", Category::AssetsStore),
    ("core", Category::Registry),
    ("third-party", Category::AssetsStore),
];

impl Category {
    pub const ALL: [Category; 2] = [Category::Registry, Category::AssetsStore];

    /// Map a raw category string to its canonical value, or `None` if unknown.
    pub fn normalize(raw: &str) -> Option<Category> {
        CATEGORY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map(|(_, category)| *category)
    }

    /// Category for an entry that declares none: names under a core prefix
    /// are first-party registry packages, everything else is an asset.
    pub fn infer<S: AsRef<str>>(name: &PackageName, core_prefixes: &[S]) -> Category {
        if core_prefixes.iter().any(|p| name.has_prefix(p.as_ref())) {
            Category::Registry
        } else {
            Category::AssetsStore
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Registry => "registry",
            Category::AssetsStore => "assets-store",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names() {
        assert_eq!(Category::normalize("registry"), Some(Category::Registry));
        assert_eq!(
            Category::normalize("assets-store"),
            Some(Category::AssetsStore)
        );
    }

    #[test]
    fn legacy_aliases() {
        assert_eq!(Category::normalize("core"), Some(Category::Registry));
        assert_eq!(
            Category::normalize("third-party"),
            Some(Category::AssetsStore)
        );
    }

    #[test]
    fn unknown_rejected() {
        assert_eq!(Category::normalize("Core"), None);
        assert_eq!(Category::normalize("plugins"), None);
        assert_eq!(Category::normalize(""), None);
    }

    #[test]
    fn inference_by_prefix() {
        let core = PackageName::parse("com.nexel.ui").unwrap();
        let other = PackageName::parse("org.someone.tool").unwrap();
        assert_eq!(Category::infer(&core, &["com.nexel."]), Category::Registry);
        assert_eq!(
            Category::infer(&other, &["com.nexel."]),
            Category::AssetsStore
        );
    }

    #[test]
    fn serde_kebab_case() {
        let json = serde_json::to_string(&Category::AssetsStore).unwrap();
        assert_eq!(json, "\"assets-store\"");
    }
}
