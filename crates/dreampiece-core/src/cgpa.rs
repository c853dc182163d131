//! Current and target CGPA.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, ValidationError};
use crate::storage::{keys, CgpaConfig, KeyValueStore};

pub const MIN_CGPA: f64 = 0.0;
pub const MAX_CGPA: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CgpaKind {
    Current,
    Target,
}

impl CgpaKind {
    pub fn key(self) -> &'static str {
        match self {
            CgpaKind::Current => keys::CURRENT_CGPA,
            CgpaKind::Target => keys::TARGET_CGPA,
        }
    }

    pub fn fallback(self, config: &CgpaConfig) -> f64 {
        match self {
            CgpaKind::Current => config.default_current,
            CgpaKind::Target => config.default_target,
        }
    }
}

impl fmt::Display for CgpaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CgpaKind::Current => "current",
            CgpaKind::Target => "target",
        })
    }
}

impl FromStr for CgpaKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(CgpaKind::Current),
            "target" => Ok(CgpaKind::Target),
            other => Err(ValidationError::InvalidValue {
                field: "cgpa kind".into(),
                message: format!("expected 'current' or 'target', got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgpaRecord {
    pub kind: CgpaKind,
    pub value: f64,
}

impl CgpaRecord {
    pub fn display(&self) -> String {
        format_cgpa(self.value)
    }
}

/// Round the exact binary value to one decimal and drop a trailing `.0`.
///
/// `8.50` shows as `8.5`, `7.00` as `7`. `8.45` is stored just below the
/// half and shows as `8.4`. Exact ties (quarter values such as `8.25`)
/// round away from zero.
pub fn format_cgpa(value: f64) -> String {
    // Only odd multiples of 0.25 sit exactly on a tie.
    let tie = (value * 4.0).fract() == 0.0 && (value * 2.0).fract() != 0.0;
    let value = if tie {
        (value * 10.0).round() / 10.0
    } else if value == 0.0 {
        0.0
    } else {
        value
    };
    let text = format!("{value:.1}");
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Parse user input, accepting only finite numbers in `[0, 10]`.
pub fn parse_cgpa(kind: CgpaKind, input: &str) -> Result<f64, ValidationError> {
    let field = kind.key().to_string();
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidValue {
            field: field.clone(),
            message: format!("'{}' is not a number", input.trim()),
        })?;
    if !value.is_finite() || !(MIN_CGPA..=MAX_CGPA).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: MIN_CGPA,
            max: MAX_CGPA,
            value,
        });
    }
    Ok(value)
}

/// Stored value, or the configured fallback when missing or unparsable.
pub fn load<K: KeyValueStore + ?Sized>(store: &K, kind: CgpaKind, config: &CgpaConfig) -> Result<CgpaRecord> {
    let value = match store.get(kind.key())? {
        None => kind.fallback(config),
        Some(raw) => match parse_cgpa(kind, &raw) {
            Ok(v) => v,
            Err(e) => {
                warn!("stored {kind} CGPA unusable, using default: {e}");
                kind.fallback(config)
            }
        },
    };
    Ok(CgpaRecord { kind, value })
}

/// Validate and store. Invalid input leaves the store untouched.
pub fn save<K: KeyValueStore + ?Sized>(store: &K, kind: CgpaKind, input: &str) -> Result<CgpaRecord> {
    let value = parse_cgpa(kind, input)?;
    store.set(kind.key(), &value.to_string())?;
    info!(%kind, value, "CGPA saved");
    Ok(CgpaRecord { kind, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::Database;

    #[test]
    fn format_collapses_trailing_zero() {
        assert_eq!(format_cgpa(8.50), "8.5");
        assert_eq!(format_cgpa(7.00), "7");
        assert_eq!(format_cgpa(10.0), "10");
        assert_eq!(format_cgpa(0.0), "0");
    }

    #[test]
    fn format_rounds_to_one_decimal() {
        assert_eq!(format_cgpa(8.25), "8.3");
        assert_eq!(format_cgpa(8.24), "8.2");
        assert_eq!(format_cgpa(6.96), "7");
        assert_eq!(format_cgpa(5.9), "5.9");
    }

    #[test]
    fn format_rounds_stored_binary_value() {
        assert_eq!(format_cgpa(8.45), "8.4");
        assert_eq!(format_cgpa(9.95), "9.9");
        assert_eq!(format_cgpa(2.55), "2.5");
        assert_eq!(format_cgpa(8.75), "8.8");
        assert_eq!(format_cgpa(-0.0), "0");
    }

    #[test]
    fn parse_rejects_out_of_range_and_garbage() {
        assert!(matches!(
            parse_cgpa(CgpaKind::Current, "11"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(parse_cgpa(CgpaKind::Current, "-0.1").is_err());
        assert!(parse_cgpa(CgpaKind::Current, "abc").is_err());
        assert!(parse_cgpa(CgpaKind::Current, "NaN").is_err());
        assert!(parse_cgpa(CgpaKind::Current, "").is_err());
        assert_eq!(parse_cgpa(CgpaKind::Target, " 9.1 ").unwrap(), 9.1);
        assert_eq!(parse_cgpa(CgpaKind::Target, "10").unwrap(), 10.0);
    }

    #[test]
    fn load_uses_defaults_when_missing() {
        let db = Database::open_memory().unwrap();
        let config = CgpaConfig::default();
        assert_eq!(load(&db, CgpaKind::Current, &config).unwrap().display(), "5.9");
        assert_eq!(load(&db, CgpaKind::Target, &config).unwrap().display(), "8.5");
    }

    #[test]
    fn invalid_save_leaves_value_unchanged() {
        let db = Database::open_memory().unwrap();
        let config = CgpaConfig::default();
        save(&db, CgpaKind::Current, "7.4").unwrap();

        let err = save(&db, CgpaKind::Current, "11").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(db.get(keys::CURRENT_CGPA).unwrap().as_deref(), Some("7.4"));
        assert_eq!(load(&db, CgpaKind::Current, &config).unwrap().display(), "7.4");
    }

    #[test]
    fn invalid_save_without_prior_value_stores_nothing() {
        let db = Database::open_memory().unwrap();
        assert!(save(&db, CgpaKind::Target, "eleven").is_err());
        assert!(db.get(keys::TARGET_CGPA).unwrap().is_none());
    }

    #[test]
    fn malformed_stored_value_falls_back() {
        let db = Database::open_memory().unwrap();
        db.set(keys::TARGET_CGPA, "great").unwrap();
        let record = load(&db, CgpaKind::Target, &CgpaConfig::default()).unwrap();
        assert_eq!(record.value, 8.5);
    }

    #[test]
    fn kind_parses_from_cli_words() {
        assert_eq!("Current".parse::<CgpaKind>().unwrap(), CgpaKind::Current);
        assert!("final".parse::<CgpaKind>().is_err());
    }
}
