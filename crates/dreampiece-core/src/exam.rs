//! Exam countdown.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{Result, ValidationError};
use crate::storage::{keys, KeyValueStore};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whole days from `today` until `exam`, never negative.
pub fn days_until(exam: NaiveDate, today: NaiveDate) -> i64 {
    (exam - today).num_days().max(0)
}

pub fn parse_exam_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty {
            field: keys::EXAM_DATE.into(),
        });
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| ValidationError::InvalidValue {
        field: keys::EXAM_DATE.into(),
        message: format!("'{input}' is not a YYYY-MM-DD date: {e}"),
    })
}

/// The stored exam date. A malformed value is dropped from the store.
pub fn load_exam_date<K: KeyValueStore + ?Sized>(store: &K) -> Result<Option<NaiveDate>> {
    let Some(raw) = store.get(keys::EXAM_DATE)? else {
        return Ok(None);
    };
    match parse_exam_date(&raw) {
        Ok(date) => Ok(Some(date)),
        Err(e) => {
            warn!("discarding stored exam date: {e}");
            store.remove(keys::EXAM_DATE)?;
            Ok(None)
        }
    }
}

pub fn save_exam_date<K: KeyValueStore + ?Sized>(store: &K, input: &str) -> Result<NaiveDate> {
    let date = parse_exam_date(input)?;
    store.set(keys::EXAM_DATE, &date.format(DATE_FORMAT).to_string())?;
    Ok(date)
}

/// Days left until the stored exam, `0` when none is set.
pub fn days_until_stored<K: KeyValueStore + ?Sized>(store: &K, today: NaiveDate) -> Result<i64> {
    Ok(load_exam_date(store)?
        .map(|exam| days_until(exam, today))
        .unwrap_or(0))
}
