use parserlib_shared::types::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options that change how a stylesheet is parsed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    /// Stop at the first error instead of reporting it and continuing
    pub strict: bool,
    /// Accept the IE6 `*property` hack
    pub star_hack: bool,
    /// Accept the IE6-7 `_property` hack
    pub underscore_hack: bool,
    /// Accept `progid:...()` filters
    pub ie_filters: bool,
    /// Allow `@-moz-document` without any document function
    pub empty_document: bool,
    /// Only look at top level `@-moz-document` rules and skip their bodies
    pub top_doc_only: bool,
    /// Reuse the results of the previous parse for unchanged blocks
    pub reuse_cache: bool,
    /// Do not validate declaration values
    pub no_validation: bool,
}

impl ParserOptions {
    /// Reads options from a JSON object such as `{"strict": true, "starHack": true}`
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Limits of the parse cache
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Blocks that were not used for this long are dropped
    pub max_age: Duration,
    /// Minimum time between two trims of the cache
    pub trim_delay: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::from_secs(10 * 60),
            trim_delay: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_from_json() {
        let opts = ParserOptions::from_json(r#"{"strict": true, "starHack": true}"#).unwrap();
        assert!(opts.strict);
        assert!(opts.star_hack);
        assert!(!opts.ie_filters);
        assert_eq!(ParserOptions::from_json("{}").unwrap(), ParserOptions::default());
        assert!(matches!(ParserOptions::from_json("[1]"), Err(Error::Config(_))));
    }
}
