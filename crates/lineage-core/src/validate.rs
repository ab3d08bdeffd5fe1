//! Field validators
//!
//! Pure checks on a single field value. Each one either returns the
//! validated (and possibly canonicalized) value or an error naming the
//! source file, the field and the offending value.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Gender, VertexId};
use crate::record::EntityKind;

/// Maximum length for any name field (80 chars)
pub const MAX_NAME_LEN: usize = 80;

/// Children values meaning "no known children"
const NO_CHILDREN: [&str; 2] = ["none", "unknown"];

/// Date placeholder for an animal whose date was never recorded
pub const UNKNOWN_DATE: &str = "unknown";

/// Parse a YYYY/MM/DD date
///
/// All three components must be plain digits and form a real calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('/');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !(all_digits(year) && all_digits(month) && all_digits(day)) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Validate a date field, returning the original string
///
/// [`UNKNOWN_DATE`] is accepted as-is and treated as absent by the
/// chronology checks.
pub fn check_date<'a>(value: &'a str, field: &str, path: &Path) -> Result<&'a str> {
    match parse_date(value) {
        Some(_) => Ok(value),
        None if value == UNKNOWN_DATE => Ok(value),
        None => Err(Error::DateFormat {
            path: path.to_path_buf(),
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Validate a gender field and cast it to its canonical value
pub fn check_gender(value: &str, field: &str, path: &Path) -> Result<Gender> {
    Gender::parse(value).ok_or_else(|| Error::GenderFormat {
        path: path.to_path_buf(),
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Validate that a name field is at most [`MAX_NAME_LEN`] characters
pub fn check_name<'a>(value: &'a str, field: &str, path: &Path) -> Result<&'a str> {
    let len = value.chars().count();
    if len > MAX_NAME_LEN {
        return Err(Error::NameFormat {
            path: path.to_path_buf(),
            field: field.to_string(),
            value: value.to_string(),
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(value)
}

/// Validate that a raw zoo id refers to an imported zoo
pub fn check_zoo_reference(
    value: &str,
    field: &str,
    path: &Path,
    zoos: &HashSet<VertexId>,
) -> Result<VertexId> {
    let id = VertexId::parse(EntityKind::Zoo, value).ok_or_else(|| Error::InvalidId {
        path: path.to_path_buf(),
        field: field.to_string(),
        value: value.to_string(),
    })?;
    if !zoos.contains(&id) {
        return Err(Error::UnknownZoo {
            path: path.to_path_buf(),
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(id)
}

/// Parse a comma-separated children list into panda ids
///
/// `none` and `unknown` yield no children and must stand alone.
pub fn parse_children(value: &str, field: &str, path: &Path) -> Result<Vec<VertexId>> {
    let invalid = || Error::InvalidChildren {
        path: path.to_path_buf(),
        field: field.to_string(),
        value: value.to_string(),
    };

    let tokens: Vec<String> = value
        .split(',')
        .map(|t| t.chars().filter(|c| !c.is_whitespace()).collect())
        .collect();

    if tokens.iter().any(|t| NO_CHILDREN.contains(&t.as_str())) {
        return if tokens.len() == 1 {
            Ok(Vec::new())
        } else {
            Err(invalid())
        };
    }

    tokens
        .iter()
        .map(|token| {
            if token.is_empty() {
                return Err(invalid());
            }
            VertexId::parse(EntityKind::Panda, token).ok_or_else(|| Error::InvalidId {
                path: path.to_path_buf(),
                field: field.to_string(),
                value: token.clone(),
            })
        })
        .collect()
}
