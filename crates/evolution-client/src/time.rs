//! Time zone handling for message windows and timestamps.

use crate::error::EvolutionError;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Format accepted for the start/end of a message window.
pub const WINDOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used when rendering message timestamps.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Zone used to interpret window bounds and render timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum TimeZoneSetting {
    /// The host's local time zone.
    #[default]
    Local,
    /// A fixed UTC offset.
    Fixed(FixedOffset),
}

impl TimeZoneSetting {
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Render epoch seconds as `DD/MM/YYYY HH:MM:SS`.
    ///
    /// Out-of-range timestamps fall back to the raw number.
    pub fn format_timestamp(&self, epoch: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp(epoch, 0) else {
            return epoch.to_string();
        };

        match self {
            Self::Local => utc.with_timezone(&Local).format(DISPLAY_FORMAT).to_string(),
            Self::Fixed(offset) => utc.with_timezone(offset).format(DISPLAY_FORMAT).to_string(),
        }
    }

    /// Parse a `YYYY-MM-DD HH:MM:SS` wall-clock time into epoch seconds.
    pub fn parse_datetime(&self, value: &str) -> Result<i64, EvolutionError> {
        let naive = NaiveDateTime::parse_from_str(value.trim(), WINDOW_FORMAT)
            .map_err(|_| EvolutionError::InvalidDate(value.to_string()))?;

        let epoch = match self {
            Self::Local => resolve(&Local, &naive),
            Self::Fixed(offset) => resolve(offset, &naive),
        };

        epoch.ok_or_else(|| EvolutionError::InvalidDate(value.to_string()))
    }
}

// Ambiguous wall-clock times (DST fall-back) resolve to the earliest instant.
fn resolve<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<i64> {
    tz.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.timestamp())
}

impl FromStr for TimeZoneSetting {
    type Err = EvolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_ascii_lowercase().as_str() {
            "local" | "" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::utc()),
            _ => {}
        }

        let invalid = || EvolutionError::InvalidTimeZone(s.to_string());

        let (sign, rest) = match value.as_bytes().first() {
            Some(b'+') => (1, &value[1..]),
            Some(b'-') => (-1, &value[1..]),
            _ => return Err(invalid()),
        };
        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
        let hours = offset_part(hours).ok_or_else(invalid)?;
        let minutes = offset_part(minutes).ok_or_else(invalid)?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::Fixed)
            .ok_or_else(invalid)
    }
}

// One or two ASCII digits; signs and other characters are rejected.
fn offset_part(part: &str) -> Option<i32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl TryFrom<String> for TimeZoneSetting {
    type Error = EvolutionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}
