//! Date stamping for new invoices
//!
//! The creation date is stored as display text, so both the clock and the
//! locale are injected. Tests pin the clock with [`FixedClock`].

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Clock reading the host's local date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock that always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Locale used to render numeric year/month/day dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateLocale {
    /// `dd.MM.yyyy`
    #[serde(rename = "ro-RO")]
    RoRo,
    /// `M/d/yyyy`
    #[serde(rename = "en-US")]
    EnUs,
    /// `yyyy-MM-dd`
    #[serde(rename = "iso")]
    Iso,
}

impl DateLocale {
    pub fn format(&self, date: NaiveDate) -> String {
        match self {
            DateLocale::RoRo => date.format("%d.%m.%Y").to_string(),
            DateLocale::EnUs => format!("{}/{}/{}", date.month(), date.day(), date.year()),
            DateLocale::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DateLocale::RoRo => "ro-RO",
            DateLocale::EnUs => "en-US",
            DateLocale::Iso => "iso",
        }
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DateLocale {
    type Err = String;

    /// Locale tags are matched case-insensitively; a bare language
    /// subtag selects its default region.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ro-ro" | "ro" => Ok(DateLocale::RoRo),
            "en-us" | "en" => Ok(DateLocale::EnUs),
            "iso" | "iso-8601" => Ok(DateLocale::Iso),
            other => Err(format!("unsupported date locale: {other}")),
        }
    }
}

/// Clock plus locale, shared by every create call
#[derive(Clone)]
pub struct DateFormatPolicy {
    clock: Arc<dyn Clock>,
    locale: DateLocale,
}

impl DateFormatPolicy {
    pub fn new(clock: impl Clock + 'static, locale: DateLocale) -> Self {
        Self {
            clock: Arc::new(clock),
            locale,
        }
    }

    /// Policy reading the host clock
    pub fn system(locale: DateLocale) -> Self {
        Self::new(SystemClock, locale)
    }

    /// Today's date rendered in the configured locale
    pub fn today(&self) -> String {
        self.locale.format(self.clock.today())
    }

    pub fn locale(&self) -> DateLocale {
        self.locale
    }
}

impl Default for DateFormatPolicy {
    fn default() -> Self {
        Self::system(DateLocale::RoRo)
    }
}

impl fmt::Debug for DateFormatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateFormatPolicy")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
