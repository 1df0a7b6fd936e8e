//! Provider configuration and JSON loading.
//!
//! With the `serde` feature, a [`QueryMap`] can be read from a JSON object
//! whose values are either pixel counts or length strings:
//!
//! ```rust
//! # #[cfg(feature = "serde")]
//! # {
//! use floem_media_query::query::{QueryMap, Threshold};
//!
//! let queries = QueryMap::from_json(r#"{ "small": 0, "wide": "75em" }"#).unwrap();
//! assert_eq!(queries.get("small"), Some(&Threshold::Px(0.0)));
//! assert_eq!(queries.get("wide"), Some(&Threshold::Length("75em".into())));
//! # }
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::query::QueryMap;

/// Options of a [`MediaQueryProvider`](crate::provider::MediaQueryProvider).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ProviderConfig {
    /// Emit every published snapshot to the provider's log sink.
    pub log: bool,
}

impl ProviderConfig {
    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed media query configuration: {0}")]
    Syntax(#[source] serde_json::Error),
    #[error("invalid media query configuration: {0}")]
    Data(#[source] serde_json::Error),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            ConfigError::Data(err)
        } else {
            ConfigError::Syntax(err)
        }
    }
}

#[cfg(feature = "serde")]
impl QueryMap {
    /// Parse a JSON object of `label: threshold` pairs, keeping their order.
    ///
    /// Same as deserializing a [`QueryMap`] with `serde_json`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(feature = "serde")]
impl ProviderConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::{ConfigError, ProviderConfig};
    use crate::{
        query::{QueryMap, Threshold},
        snapshot::MatchSnapshot,
    };

    #[test]
    fn json_keeps_order() {
        let queries =
            QueryMap::from_json(r#"{ "large": 1200, "small": 0, "medium": "40em" }"#).unwrap();
        assert_eq!(queries.labels().collect::<Vec<_>>(), ["large", "small", "medium"]);
        assert_eq!(queries.get("large"), Some(&Threshold::Px(1200.0)));
        assert_eq!(queries.get("medium"), Some(&Threshold::Length("40em".into())));
    }

    #[test]
    fn from_json_matches_serde() {
        let json = r#"{ "small": 0, "medium": 600, "wide": "75em" }"#;
        let derived: QueryMap = serde_json::from_str(json).unwrap();
        assert_eq!(QueryMap::from_json(json).unwrap(), derived);

        let written = serde_json::to_string(&derived).unwrap();
        assert_eq!(written, r#"{"small":0.0,"medium":600.0,"wide":"75em"}"#);
        assert_eq!(QueryMap::from_json(&written).unwrap(), derived);
    }

    #[test]
    fn bad_threshold_is_a_data_error() {
        let json = r#"{ "small": 0, "broken": true }"#;
        let err = QueryMap::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Data(_)));
        assert!(err.to_string().contains("a pixel count or a length string"));

        // the derived impl reports the same thing
        let derived = serde_json::from_str::<QueryMap>(json).unwrap_err();
        assert!(derived.to_string().contains("a pixel count or a length string"));
    }

    #[test]
    fn malformed_json_is_a_syntax_error() {
        assert!(matches!(
            QueryMap::from_json(r#"{ "small": 0"#),
            Err(ConfigError::Syntax(_))
        ));
        assert!(matches!(
            QueryMap::from_json("[1, 2]"),
            Err(ConfigError::Data(_))
        ));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot =
            MatchSnapshot::from_iter([("small", true), ("medium", true), ("large", false)]);
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"small":true,"medium":true,"large":false}"#);
        assert_eq!(serde_json::from_str::<MatchSnapshot>(&json).unwrap(), snapshot);
    }

    #[test]
    fn config_defaults_to_no_logging() {
        assert_eq!(ProviderConfig::from_json("{}").unwrap(), ProviderConfig::default());
        assert!(ProviderConfig::from_json(r#"{ "log": true }"#).unwrap().log);
    }
}
