//! Parsing and validation of movie payloads.
//!
//! Clients send loosely typed data (numbers as strings, empty strings for missing values),
//! [`MovieInput::parse`] turns it into a strongly typed [`MovieDraft`] or reports all problems at once.

use std::fmt::Display;

use garde::Validate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::movie::WatchStatus;

pub const MIN_RELEASE_YEAR: i64 = 1888;
pub const MAX_RELEASE_YEAR: i64 = 2030;
pub const MAX_RATING: f64 = 10.0;

/// Optional number as received from client
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loose<T> {
    /// missing, null or empty string
    Absent,
    Value(T),
    /// present, but not a number
    Invalid,
}

impl<T> Default for Loose<T> {
    fn default() -> Self {
        Loose::Absent
    }
}

impl<T> Loose<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Loose::Value(v) => Some(v),
            Loose::Absent | Loose::Invalid => None,
        }
    }
}

pub trait LooseNumber: Sized {
    fn from_json_number(n: &serde_json::Number) -> Option<Self>;
    fn from_text(s: &str) -> Option<Self>;
}

impl LooseNumber for i64 {
    fn from_json_number(n: &serde_json::Number) -> Option<Self> {
        n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    fn from_text(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl LooseNumber for f64 {
    fn from_json_number(n: &serde_json::Number) -> Option<Self> {
        n.as_f64()
    }

    fn from_text(s: &str) -> Option<Self> {
        s.parse::<f64>().ok().filter(|f| f.is_finite())
    }
}

impl<'de, T: LooseNumber> Deserialize<'de> for Loose<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde_json::Value;
        let value = Value::deserialize(deserializer)?;
        let parsed = match value {
            Value::Null => Loose::Absent,
            Value::String(s) if s.trim().is_empty() => Loose::Absent,
            Value::String(s) => T::from_text(s.trim()).map_or(Loose::Invalid, Loose::Value),
            Value::Number(n) => T::from_json_number(&n).map_or(Loose::Invalid, Loose::Value),
            _ => Loose::Invalid,
        };
        Ok(parsed)
    }
}

/// `null` is accepted for text fields and means empty text
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[allow(clippy::ptr_arg)]
fn title_required(value: &String, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        Err(garde::Error::new("Title is required"))
    } else {
        Ok(())
    }
}

fn release_year_valid(value: &Loose<i64>, _ctx: &()) -> garde::Result {
    match value {
        Loose::Invalid => Err(garde::Error::new("Release year must be a valid number")),
        Loose::Value(year) if !(MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(year) => {
            Err(garde::Error::new(format!(
                "Release year must be between {MIN_RELEASE_YEAR} and {MAX_RELEASE_YEAR}"
            )))
        }
        _ => Ok(()),
    }
}

fn runtime_valid(value: &Loose<i64>, _ctx: &()) -> garde::Result {
    match value {
        Loose::Invalid => Err(garde::Error::new("Runtime must be a valid number")),
        Loose::Value(runtime) if *runtime <= 0 => {
            Err(garde::Error::new("Runtime must be a positive number"))
        }
        _ => Ok(()),
    }
}

fn rating_valid(value: &Loose<f64>, _ctx: &()) -> garde::Result {
    match value {
        Loose::Invalid => Err(garde::Error::new("Rating must be a valid number")),
        Loose::Value(rating) if !(0.0..=MAX_RATING).contains(rating) => {
            Err(garde::Error::new("Rating must be between 0 and 10"))
        }
        _ => Ok(()),
    }
}

/// Movie payload for create and update, `id` and `dateAdded` are never taken from client
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MovieInput {
    #[garde(custom(title_required))]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[garde(skip)]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub director: String,
    #[garde(custom(release_year_valid))]
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub release_year: Loose<i64>,
    #[garde(skip)]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genre: String,
    #[garde(custom(runtime_valid))]
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub runtime: Loose<i64>,
    #[garde(skip)]
    #[serde(default)]
    pub watch_status: Option<String>,
    #[garde(custom(rating_valid))]
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub personal_rating: Loose<f64>,
    #[garde(skip)]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub review_notes: String,
}

impl MovieInput {
    pub fn with_title(title: impl Into<String>) -> Self {
        MovieInput {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Validates and normalizes the payload in one go
    pub fn parse(self) -> Result<MovieDraft, ValidationErrors> {
        self.validate()?;
        Ok(MovieDraft {
            title: self.title.trim().to_string(),
            director: self.director.trim().to_string(),
            release_year: self.release_year.value(),
            genre: self.genre.trim().to_string(),
            runtime: self.runtime.value(),
            watch_status: self
                .watch_status
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(WatchStatus::from)
                .unwrap_or_default(),
            personal_rating: self.personal_rating.value(),
            review_notes: self.review_notes.trim().to_string(),
        })
    }
}

/// Validated and normalized movie data, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub director: String,
    pub release_year: Option<i64>,
    pub genre: String,
    pub runtime: Option<i64>,
    pub watch_status: WatchStatus,
    pub personal_rating: Option<f64>,
    pub review_notes: String,
}

/// All validation problems found in a payload, in field order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new(messages: Vec<String>) -> Self {
        ValidationErrors(messages)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

impl From<garde::Report> for ValidationErrors {
    fn from(report: garde::Report) -> Self {
        ValidationErrors(
            report
                .iter()
                .map(|(_path, error)| error.message().to_string())
                .collect(),
        )
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}
