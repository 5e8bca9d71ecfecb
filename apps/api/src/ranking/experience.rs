//! Experience Extractor: bounds the experience section of a document and sums
//! the date ranges found inside it.
//!
//! Documents without a standalone experience header score zero years, even when
//! prose elsewhere mentions dates. Education and project dates never count.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Utc};
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::warn;

use crate::ranking::vocabulary::{EXPERIENCE_HEADERS, PRESENT_TOKENS, STOP_HEADERS};

/// Hard cap on reported experience.
pub const MAX_EXPERIENCE_YEARS: f64 = 40.0;
/// Totals below this are treated as parsing noise and reported as zero.
pub const NOISE_FLOOR_YEARS: f64 = 0.5;

const DAYS_PER_YEAR: f64 = 365.25;

const MONTH: &str = r"january|february|march|april|may|june|july|august|september|sept|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec";

/// One accepted `<start> - <end>` range inside the experience section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub start_year: i32,
    pub start_month: Option<u32>,
    pub end: RangeEnd,
    pub years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeEnd {
    Present,
    Date { year: i32, month: Option<u32> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceSummary {
    /// Total after the noise floor and cap are applied.
    pub years: f64,
    pub ranges: Vec<DateRange>,
}

impl ExperienceSummary {
    fn none() -> Self {
        Self {
            years: 0.0,
            ranges: vec![],
        }
    }
}

fn standalone_line_patterns(headers: &[&str]) -> Vec<Regex> {
    headers
        .iter()
        .filter_map(|header| {
            let pattern = format!(r"(?m)^[ \t]*{}[ \t]*:?[ \t]*\r?$", regex::escape(header));
            Regex::new(&pattern)
                .map_err(|e| warn!("Skipping header '{header}': {e}"))
                .ok()
        })
        .collect()
}

static EXPERIENCE_HEADER_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| standalone_line_patterns(EXPERIENCE_HEADERS));

static STOP_HEADER_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| standalone_line_patterns(STOP_HEADERS));

static DATE_RANGE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let present = PRESENT_TOKENS.join("|");
    let pattern = format!(
        r"(?:\b(?P<sm>{MONTH})\.?\s+)?\b(?P<sy>(?:19|20)\d{{2}})\s*[-–]\s*(?:(?:\b(?P<em>{MONTH})\.?\s+)?\b(?P<ey>(?:19|20)\d{{2}})\b|\b(?P<present>{present})\b)"
    );
    Regex::new(&pattern)
        .map_err(|e| warn!("Date range pattern failed to compile: {e}"))
        .ok()
});

/// Total years of experience in `text`, measured against today's date.
pub fn extract_experience(text: &str) -> f64 {
    extract_experience_at(text, Utc::now().date_naive()).years
}

/// Experience extraction with an explicit notion of "today" for present-tense ranges.
pub fn extract_experience_at(text: &str, today: NaiveDate) -> ExperienceSummary {
    let lowered = text.to_lowercase();

    let Some(section) = experience_section(&lowered) else {
        return ExperienceSummary::none();
    };

    let Some(date_range) = DATE_RANGE.as_ref() else {
        return ExperienceSummary::none();
    };

    let ranges: Vec<DateRange> = date_range
        .captures_iter(section)
        .filter_map(|caps| parse_range(&caps, today))
        .collect();

    let total: f64 = ranges.iter().map(|r| r.years).sum();
    let years = if total < NOISE_FLOOR_YEARS {
        0.0
    } else {
        total.min(MAX_EXPERIENCE_YEARS)
    };

    ExperienceSummary { years, ranges }
}

/// Display form used in scan results, e.g. `"4.5 Years"`.
pub fn format_years(years: f64) -> String {
    format!("{:.1} Years", years)
}

/// Slice of lowercased text between the experience header and the nearest stop header.
fn experience_section(lowered: &str) -> Option<&str> {
    // Header priority follows list order, not position in the document.
    let start = EXPERIENCE_HEADER_PATTERNS
        .iter()
        .find_map(|re| re.find(lowered))
        .map(|m| m.end())?;

    let rest = &lowered[start..];
    let end = STOP_HEADER_PATTERNS
        .iter()
        .filter_map(|re| re.find(rest))
        .map(|m| m.start())
        .min()
        .unwrap_or(rest.len());

    Some(&rest[..end])
}

fn parse_range(caps: &Captures<'_>, today: NaiveDate) -> Option<DateRange> {
    let start_year: i32 = caps.name("sy")?.as_str().parse().ok()?;
    let start_month = caps.name("sm").and_then(|m| month_number(m.as_str()));

    let end = if caps.name("present").is_some() {
        RangeEnd::Present
    } else {
        RangeEnd::Date {
            year: caps.name("ey")?.as_str().parse().ok()?,
            month: caps.name("em").and_then(|m| month_number(m.as_str())),
        }
    };

    let end_month = match &end {
        RangeEnd::Date { month, .. } => *month,
        RangeEnd::Present => None,
    };

    let years = if start_month.is_none() && end_month.is_none() {
        let end_year = match &end {
            RangeEnd::Present => today.year(),
            RangeEnd::Date { year, .. } => *year,
        };
        (end_year - start_year) as f64
    } else {
        let start = NaiveDate::from_ymd_opt(start_year, start_month.unwrap_or(1), 1)?;
        let end_date = match &end {
            RangeEnd::Present => today,
            RangeEnd::Date { year, month } => NaiveDate::from_ymd_opt(*year, month.unwrap_or(1), 1)?,
        };
        (end_date - start).num_days() as f64 / DAYS_PER_YEAR
    };

    if years < 0.0 {
        return None;
    }

    Some(DateRange {
        start_year,
        start_month,
        end,
        years,
    })
}

fn month_number(token: &str) -> Option<u32> {
    let month = match token.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
