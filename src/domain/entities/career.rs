use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// ───── Constants ──────────────────────────────────────────────────────
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

static YEAR_MONTH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})$").expect("year-month pattern is valid")
});

// ───── Year-month value ──────────────────────────────────────────────

/// A calendar month, written `YYYY-MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

#[derive(Debug, Display, PartialEq, Eq)]
#[display("invalid year-month '{_0}', expected YYYY-MM")]
pub struct YearMonthParseError(pub String);

impl std::error::Error for YearMonthParseError {}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (MIN_YEAR..=MAX_YEAR).contains(&year) && (1..=12).contains(&month) {
            Some(YearMonth { year, month })
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month, the form stored in the database.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("YearMonth is range-checked on construction")
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl FromStr for YearMonth {
    type Err = YearMonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || YearMonthParseError(raw.to_string());

        let captures = YEAR_MONTH_PATTERN.captures(raw).ok_or_else(invalid)?;
        let year = captures[1].parse::<i32>().map_err(|_| invalid())?;
        let month = captures[2].parse::<u32>().map_err(|_| invalid())?;

        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ───── Career entry ──────────────────────────────────────────────────

/// One employment record on an alumni profile, as handed to persistence.
///
/// Only `career::CareerDraft::validate_and_normalize` produces these from user
/// input, so `is_current` always implies `end_date == None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerEntry {
    pub position: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: YearMonth,
    pub end_date: Option<YearMonth>,
    pub is_current: bool,
    pub description: Option<String>,
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CareerEntryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub position: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredCareerEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub entry: CareerEntry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CareerListResponse {
    pub entries: Vec<StoredCareerEntry>,
    pub total: usize,
}

// ───── Conversions ──────────────────────────────────────────────────

impl From<CareerEntryRow> for StoredCareerEntry {
    fn from(row: CareerEntryRow) -> Self {
        StoredCareerEntry {
            id: row.id,
            user_id: row.user_id,
            entry: CareerEntry {
                position: row.position,
                company: row.company,
                location: row.location,
                start_date: row.start_date.into(),
                end_date: if row.is_current { None } else { row.end_date.map(YearMonth::from) },
                is_current: row.is_current,
                description: row.description,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<Vec<StoredCareerEntry>> for CareerListResponse {
    fn from(entries: Vec<StoredCareerEntry>) -> Self {
        let total = entries.len();
        CareerListResponse { entries, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_year_month() {
        let ym: YearMonth = "2020-01".parse().unwrap();
        assert_eq!(ym.year(), 2020);
        assert_eq!(ym.month(), 1);
        assert_eq!(ym.to_string(), "2020-01");
        assert_eq!(" 1999-12 ".parse::<YearMonth>().unwrap().to_string(), "1999-12");
    }

    #[test]
    fn rejects_malformed_year_month() {
        for raw in ["", "2020", "2020-1", "2020-13", "2020-00", "20-01", "2020/01", "1899-05", "2020-01-01"] {
            assert!(raw.parse::<YearMonth>().is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn year_month_orders_chronologically() {
        let a: YearMonth = "2019-12".parse().unwrap();
        let b: YearMonth = "2020-01".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn year_month_maps_to_first_day_and_back() {
        let ym: YearMonth = "2021-07".parse().unwrap();
        let date = ym.first_day();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 7, 1).unwrap());
        assert_eq!(YearMonth::from(NaiveDate::from_ymd_opt(2021, 7, 23).unwrap()), ym);
    }

    #[test]
    fn year_month_serde_uses_string_form() {
        let ym: YearMonth = serde_json::from_str("\"2022-03\"").unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"2022-03\"");
        assert!(serde_json::from_str::<YearMonth>("\"March 2022\"").is_err());
    }

    #[test]
    fn stored_row_never_exposes_end_date_for_current_role() {
        let now = Utc::now();
        let row = CareerEntryRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            position: "Engineer".into(),
            company: "Acme".into(),
            location: None,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2021, 1, 1),
            is_current: true,
            description: None,
            created_at: now,
            updated_at: now,
        };

        let stored = StoredCareerEntry::from(row);
        assert_eq!(stored.entry.end_date, None);
    }
}
