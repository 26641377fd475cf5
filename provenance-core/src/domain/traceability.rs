use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const SPECIES_PREFIX_LEN: usize = 3;
pub const TRIP_SUFFIX_LEN: usize = 4;
pub const MAX_SEQUENCE: u32 = 99;
pub const MAX_HAUL_NUMBER: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct HaulId(pub i64);

impl std::fmt::Display for HaulId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything about a haul that goes into a traceability code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HaulContext {
    pub haul_id: HaulId,
    pub species_code: String,
    pub trip_code: String,
    pub haul_number: u32,
    pub capture_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceabilityCode(String);

impl TraceabilityCode {
    pub fn compose(prefix: &str, sequence: u32) -> Self {
        Self(format!("{prefix}{sequence:02}"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for TraceabilityCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceabilityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TraceabilityCode {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl From<&str> for TraceabilityCode {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl HaulContext {
    /// First three characters of the species code, uppercased and padded with `X`.
    pub fn species_prefix(&self) -> String {
        let mut prefix: String = self
            .species_code
            .trim()
            .chars()
            .flat_map(char::to_uppercase)
            .take(SPECIES_PREFIX_LEN)
            .collect();

        while prefix.chars().count() < SPECIES_PREFIX_LEN {
            prefix.push('X');
        }
        prefix
    }

    /// Last four characters of the parent trip code, uppercased and left padded with `0`.
    pub fn trip_suffix(&self) -> String {
        let chars: Vec<char> = self
            .trip_code
            .trim()
            .chars()
            .flat_map(char::to_uppercase)
            .collect();
        let start = chars.len().saturating_sub(TRIP_SUFFIX_LEN);

        let suffix: String = chars[start..].iter().collect();

        format!("{suffix:0>width$}", width = TRIP_SUFFIX_LEN)
    }

    pub fn date_code(&self) -> String {
        format!(
            "{:02}{:02}",
            self.capture_date.month(),
            self.capture_date.day()
        )
    }

    /// Deterministic part of the code, everything except the sequence.
    pub fn code_prefix(&self) -> String {
        format!(
            "{}{}{:02}{}",
            self.species_prefix(),
            self.trip_suffix(),
            self.haul_number,
            self.date_code()
        )
    }
}
