//! Filter builder
//!
//! Turns the raw search form (`FilterInput`) into a canonical
//! `QueryDescriptor` at submission time, and serializes a descriptor into
//! the measurements endpoint URL.
//!
//! Rules:
//! - Blank patient ids are omitted, never sent as `patientId=`
//! - Absent times stay absent (no "now", no epoch)
//! - `from > to` is passed through untouched; the store decides
//! - Parameter order is fixed: patientId, from, to

use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc,
};
use reqwest::Url;

/// Measurements collection endpoint, relative to the configured base URL
pub const MEASUREMENTS_PATH: &str = "/api/v1/measurements";

pub const PARAM_PATIENT_ID: &str = "patientId";
pub const PARAM_FROM: &str = "from";
pub const PARAM_TO: &str = "to";

/// Accepted spellings for local date-time entry
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Raw search criteria as entered by the operator
///
/// Owned by the UI layer and snapshotted when the operator submits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    /// Free text, may be empty or padded with whitespace
    pub patient_identifier: String,
    /// Local wall-clock start of the window
    pub from_local: Option<NaiveDateTime>,
    /// Local wall-clock end of the window
    pub to_local: Option<NaiveDateTime>,
}

impl FilterInput {
    pub fn new(
        patient_identifier: impl Into<String>,
        from_local: Option<NaiveDateTime>,
        to_local: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            patient_identifier: patient_identifier.into(),
            from_local,
            to_local,
        }
    }

    /// Build the descriptor, reading local times in the system timezone
    pub fn to_descriptor(&self) -> QueryDescriptor {
        self.to_descriptor_in(&Local)
    }

    /// Build the descriptor, reading local times in `tz`
    pub fn to_descriptor_in<Tz: TimeZone>(&self, tz: &Tz) -> QueryDescriptor {
        let trimmed = self.patient_identifier.trim();
        QueryDescriptor {
            patient_identifier: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            from: self.from_local.as_ref().map(|t| local_to_utc(tz, t)),
            to: self.to_local.as_ref().map(|t| local_to_utc(tz, t)),
        }
    }
}

/// Normalized, transport-ready search criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDescriptor {
    patient_identifier: Option<String>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl QueryDescriptor {
    pub fn patient_identifier(&self) -> Option<&str> {
        self.patient_identifier.as_deref()
    }

    pub fn from(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    pub fn to(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    /// True when no criteria are set (the store returns everything)
    pub fn is_unfiltered(&self) -> bool {
        self.patient_identifier.is_none() && self.from.is_none() && self.to.is_none()
    }

    /// Query parameters for the present fields, in documented order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(ref id) = self.patient_identifier {
            pairs.push((PARAM_PATIENT_ID, id.clone()));
        }
        if let Some(from) = self.from {
            pairs.push((PARAM_FROM, format_instant(&from)));
        }
        if let Some(to) = self.to {
            pairs.push((PARAM_TO, format_instant(&to)));
        }
        pairs
    }

    /// Percent-encoded query string (empty when no fields are present)
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full request URL under `base`
    ///
    /// Any path prefix on `base` is kept; an existing query or fragment is
    /// dropped.
    pub fn request_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        let path = format!("{}{}", base.path().trim_end_matches('/'), MEASUREMENTS_PATH);
        url.set_path(&path);
        url.set_fragment(None);

        let query = self.query_string();
        if query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&query));
        }
        url
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T10:00:00.000Z`
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Interpret a wall-clock time in `tz` and return the absolute instant
///
/// DST fold: the earlier of the two instants.
/// DST gap: the offset in force before the transition.
pub fn local_to_utc<Tz: TimeZone>(tz: &Tz, local: &NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let before = tz
                .offset_from_utc_datetime(&(*local - Duration::days(1)))
                .fix();
            let utc = *local - Duration::seconds(i64::from(before.local_minus_utc()));
            Utc.from_utc_datetime(&utc)
        }
    }
}

/// Parse operator-entered local date-time text
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, with `T` or a single space as separator.
/// Used by the input widgets; the filter builder itself only ever sees
/// well-formed values.
pub fn parse_local_datetime(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let text = text.trim();
    LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map_or_else(
            || NaiveDateTime::parse_from_str(text, LOCAL_DATETIME_FORMATS[0]),
            Ok,
        )
}
