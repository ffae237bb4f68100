//! Draft editing and submit-time validation for career entries.
//!
//! A [`CareerDraft`] is the in-memory, not-yet-persisted entry a profile form
//! edits field by field. Submitting runs [`CareerDraft::validate_and_normalize`],
//! which either yields a [`CareerEntry`] ready for persistence or a
//! [`CareerValidationError`] naming what the user still has to fill in.

use std::fmt;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::entities::career::{CareerEntry, YearMonth};

/// Fields of a career entry, as named in field-change events and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum CareerField {
    #[display("position")]
    Position,
    #[display("company")]
    Company,
    #[display("location")]
    Location,
    #[display("start_date")]
    StartDate,
    #[display("end_date")]
    EndDate,
    #[display("is_current")]
    IsCurrent,
    #[display("description")]
    Description,
}

impl CareerField {
    /// Human label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            CareerField::Position => "Position",
            CareerField::Company => "Company",
            CareerField::Location => "Location",
            CareerField::StartDate => "Start Date",
            CareerField::EndDate => "End Date",
            CareerField::IsCurrent => "Currently Employed",
            CareerField::Description => "Description",
        }
    }
}

/// A single field-change event: `{"field": "company", "value": "Acme"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    Position(String),
    Company(String),
    Location(String),
    StartDate(String),
    EndDate(Option<String>),
    IsCurrent(bool),
    Description(String),
}

impl FieldEdit {
    pub fn field(&self) -> CareerField {
        match self {
            FieldEdit::Position(_) => CareerField::Position,
            FieldEdit::Company(_) => CareerField::Company,
            FieldEdit::Location(_) => CareerField::Location,
            FieldEdit::StartDate(_) => CareerField::StartDate,
            FieldEdit::EndDate(_) => CareerField::EndDate,
            FieldEdit::IsCurrent(_) => CareerField::IsCurrent,
            FieldEdit::Description(_) => CareerField::Description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CareerValidationError {
    /// Position, company or start date left empty. Lists every missing one.
    MissingRequiredField(Vec<CareerField>),
    /// Not marked current and no end date given.
    MissingEndDate,
    /// A date field was filled in but is not `YYYY-MM`.
    InvalidYearMonth(CareerField),
}

impl CareerValidationError {
    /// Fields the user has to correct.
    pub fn fields(&self) -> Vec<CareerField> {
        match self {
            CareerValidationError::MissingRequiredField(fields) => fields.clone(),
            CareerValidationError::MissingEndDate => vec![CareerField::EndDate],
            CareerValidationError::InvalidYearMonth(field) => vec![*field],
        }
    }

    /// Message for a single offending field.
    pub fn field_message(&self, field: CareerField) -> String {
        match self {
            CareerValidationError::MissingRequiredField(_) => format!("{} is required", field.label()),
            CareerValidationError::MissingEndDate => {
                "Please specify the End Date or mark the position as current".to_string()
            }
            CareerValidationError::InvalidYearMonth(_) => {
                format!("{} must be a month in YYYY-MM format", field.label())
            }
        }
    }
}

impl fmt::Display for CareerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CareerValidationError::MissingRequiredField(fields) => {
                let labels: Vec<&str> = fields.iter().map(CareerField::label).collect();
                write!(f, "Please fill in {}.", join_labels(&labels))
            }
            CareerValidationError::MissingEndDate => {
                write!(f, "Please specify the End Date or mark the position as current.")
            }
            CareerValidationError::InvalidYearMonth(field) => {
                write!(f, "{} must be a month in YYYY-MM format.", field.label())
            }
        }
    }
}

impl std::error::Error for CareerValidationError {}

fn join_labels(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [one] => one.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}

/// Editable form state for one career entry.
///
/// Dates are kept as the raw text the user typed; they are only parsed at
/// submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerDraft {
    pub position: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub description: String,
}

impl CareerDraft {
    pub fn new() -> Self {
        CareerDraft::default()
    }

    /// Seeds a draft from a stored entry so it can be edited again.
    pub fn from_entry(entry: &CareerEntry) -> Self {
        CareerDraft {
            position: entry.position.clone(),
            company: entry.company.clone(),
            location: entry.location.clone().unwrap_or_default(),
            start_date: entry.start_date.to_string(),
            end_date: entry.end_date.map(|d| d.to_string()),
            is_current: entry.is_current,
            description: entry.description.clone().unwrap_or_default(),
        }
    }

    /// Applies one field-change event.
    ///
    /// Turning `is_current` on clears `end_date`; turning it off leaves the
    /// (already cleared) end date alone, so it has to be entered again. End
    /// date edits are dropped while the position is current.
    pub fn set_field(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Position(value) => self.position = value,
            FieldEdit::Company(value) => self.company = value,
            FieldEdit::Location(value) => self.location = value,
            FieldEdit::StartDate(value) => self.start_date = value,
            FieldEdit::EndDate(value) => {
                if !self.is_current {
                    self.end_date = value;
                }
            }
            FieldEdit::IsCurrent(value) => {
                self.is_current = value;
                if value {
                    self.end_date = None;
                }
            }
            FieldEdit::Description(value) => self.description = value,
        }
    }

    pub fn apply_all<I>(&mut self, edits: I)
    where
        I: IntoIterator<Item = FieldEdit>,
    {
        for edit in edits {
            self.set_field(edit);
        }
    }

    /// Back to the empty state a freshly opened form starts with.
    pub fn reset(&mut self) {
        *self = CareerDraft::default();
    }

    /// Checks the draft is complete and consistent and returns the entry to
    /// persist. Blank text counts as empty. `end_date` is always dropped for a
    /// current position, even if the draft still carries one.
    pub fn validate_and_normalize(&self) -> Result<CareerEntry, CareerValidationError> {
        let position = self.position.trim();
        let company = self.company.trim();
        let start_raw = self.start_date.trim();

        let missing: Vec<CareerField> = [
            (CareerField::Position, position),
            (CareerField::Company, company),
            (CareerField::StartDate, start_raw),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(CareerValidationError::MissingRequiredField(missing));
        }

        let end_raw = self
            .end_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if !self.is_current && end_raw.is_none() {
            return Err(CareerValidationError::MissingEndDate);
        }

        let start_date = parse_month(start_raw, CareerField::StartDate)?;
        let end_date = match (self.is_current, end_raw) {
            (false, Some(raw)) => Some(parse_month(raw, CareerField::EndDate)?),
            _ => None,
        };

        Ok(CareerEntry {
            position: position.to_string(),
            company: company.to_string(),
            location: optional_text(&self.location),
            start_date,
            end_date,
            is_current: self.is_current,
            description: optional_text(&self.description),
        })
    }
}

/// Free-standing form of [`CareerDraft::validate_and_normalize`].
pub fn validate_and_normalize(draft: &CareerDraft) -> Result<CareerEntry, CareerValidationError> {
    draft.validate_and_normalize()
}

fn parse_month(raw: &str, field: CareerField) -> Result<YearMonth, CareerValidationError> {
    raw.parse::<YearMonth>()
        .map_err(|_| CareerValidationError::InvalidYearMonth(field))
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(position: &str, company: &str, start: &str, is_current: bool, end: Option<&str>) -> CareerDraft {
        CareerDraft {
            position: position.into(),
            company: company.into(),
            start_date: start.into(),
            is_current,
            end_date: end.map(String::from),
            ..CareerDraft::default()
        }
    }

    fn ym(raw: &str) -> YearMonth {
        raw.parse().unwrap()
    }

    #[test]
    fn current_position_drops_end_date() {
        let entry = draft("Engineer", "Acme", "2020-01", true, Some("2021-01"))
            .validate_and_normalize()
            .unwrap();

        assert_eq!(entry.position, "Engineer");
        assert_eq!(entry.company, "Acme");
        assert_eq!(entry.start_date, ym("2020-01"));
        assert!(entry.is_current);
        assert_eq!(entry.end_date, None);
    }

    #[test]
    fn empty_position_is_missing_required_field() {
        let err = draft("", "Acme", "2020-01", false, Some("2021-01"))
            .validate_and_normalize()
            .unwrap_err();

        assert_eq!(err, CareerValidationError::MissingRequiredField(vec![CareerField::Position]));
    }

    #[test]
    fn past_position_without_end_date_is_rejected() {
        let err = draft("Engineer", "Acme", "2020-01", false, Some(""))
            .validate_and_normalize()
            .unwrap_err();
        assert_eq!(err, CareerValidationError::MissingEndDate);

        let err = draft("Engineer", "Acme", "2020-01", false, None)
            .validate_and_normalize()
            .unwrap_err();
        assert_eq!(err, CareerValidationError::MissingEndDate);
    }

    #[test]
    fn every_missing_required_field_is_reported() {
        let err = CareerDraft::new().validate_and_normalize().unwrap_err();
        assert_eq!(
            err,
            CareerValidationError::MissingRequiredField(vec![
                CareerField::Position,
                CareerField::Company,
                CareerField::StartDate,
            ])
        );
        assert_eq!(err.to_string(), "Please fill in Position, Company, and Start Date.");
    }

    #[test]
    fn missing_required_fields_win_over_missing_end_date() {
        for (position, company, start) in [("", "Acme", "2020-01"), ("Engineer", "", "2020-01"), ("Engineer", "Acme", "")] {
            let err = draft(position, company, start, false, None)
                .validate_and_normalize()
                .unwrap_err();
            assert!(matches!(err, CareerValidationError::MissingRequiredField(_)));
        }
    }

    #[test]
    fn blank_text_counts_as_empty() {
        let err = draft("   ", "Acme", "2020-01", true, None)
            .validate_and_normalize()
            .unwrap_err();
        assert_eq!(err, CareerValidationError::MissingRequiredField(vec![CareerField::Position]));
    }

    #[test]
    fn malformed_dates_are_rejected_with_the_field() {
        let err = draft("Engineer", "Acme", "Jan 2020", true, None)
            .validate_and_normalize()
            .unwrap_err();
        assert_eq!(err, CareerValidationError::InvalidYearMonth(CareerField::StartDate));

        let err = draft("Engineer", "Acme", "2020-01", false, Some("2021-13"))
            .validate_and_normalize()
            .unwrap_err();
        assert_eq!(err, CareerValidationError::InvalidYearMonth(CareerField::EndDate));
    }

    #[test]
    fn current_position_ignores_garbage_end_date() {
        let entry = draft("Engineer", "Acme", "2020-01", true, Some("not a date"))
            .validate_and_normalize()
            .unwrap();
        assert_eq!(entry.end_date, None);
    }

    #[test]
    fn normalization_trims_text_and_drops_empty_optionals() {
        let mut d = draft("  Engineer ", " Acme", "2020-01", false, Some(" 2021-06 "));
        d.location = "  ".into();
        d.description = " Built things. ".into();

        let entry = d.validate_and_normalize().unwrap();
        assert_eq!(entry.position, "Engineer");
        assert_eq!(entry.company, "Acme");
        assert_eq!(entry.location, None);
        assert_eq!(entry.description.as_deref(), Some("Built things."));
        assert_eq!(entry.end_date, Some(ym("2021-06")));
    }

    #[test]
    fn revalidating_a_normalized_entry_is_identity() {
        let drafts = [
            draft("Engineer", "Acme", "2020-01", true, Some("2021-01")),
            draft(" Analyst ", "Globex", "2018-05", false, Some("2019-09")),
        ];

        for d in drafts {
            let first = d.validate_and_normalize().unwrap();
            let second = CareerDraft::from_entry(&first).validate_and_normalize().unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn marking_current_clears_end_date() {
        let mut d = draft("Engineer", "Acme", "2020-01", false, Some("2021-01"));
        d.set_field(FieldEdit::IsCurrent(true));
        assert!(d.is_current);
        assert_eq!(d.end_date, None);
    }

    #[test]
    fn unmarking_current_keeps_end_date_absent() {
        let mut d = draft("Engineer", "Acme", "2020-01", false, Some("2021-01"));
        d.set_field(FieldEdit::IsCurrent(true));
        d.set_field(FieldEdit::IsCurrent(false));

        assert_eq!(d.end_date, None);
        assert_eq!(d.validate_and_normalize().unwrap_err(), CareerValidationError::MissingEndDate);

        d.set_field(FieldEdit::EndDate(Some("2021-01".into())));
        assert_eq!(d.validate_and_normalize().unwrap().end_date, Some(ym("2021-01")));
    }

    #[test]
    fn unmarking_current_leaves_a_not_current_end_date_untouched() {
        let mut d = draft("Engineer", "Acme", "2020-01", false, Some("2021-01"));
        d.set_field(FieldEdit::IsCurrent(false));
        assert_eq!(d.end_date.as_deref(), Some("2021-01"));
    }

    #[test]
    fn end_date_edits_are_ignored_while_current() {
        let mut d = draft("Engineer", "Acme", "2020-01", true, None);
        d.set_field(FieldEdit::EndDate(Some("2021-01".into())));
        assert_eq!(d.end_date, None);
    }

    #[test]
    fn reset_returns_to_an_empty_draft() {
        let mut d = draft("Engineer", "Acme", "2020-01", true, None);
        d.reset();
        assert_eq!(d, CareerDraft::new());
    }

    #[test]
    fn field_edits_deserialize_from_field_value_pairs() {
        let edits: Vec<FieldEdit> = serde_json::from_str(
            r#"[
                {"field": "company", "value": "Initech"},
                {"field": "is_current", "value": true},
                {"field": "end_date", "value": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            edits,
            vec![
                FieldEdit::Company("Initech".into()),
                FieldEdit::IsCurrent(true),
                FieldEdit::EndDate(None),
            ]
        );
        assert_eq!(edits[1].field(), CareerField::IsCurrent);
    }

    #[test]
    fn error_names_fields_for_the_client() {
        let err = CareerValidationError::MissingRequiredField(vec![CareerField::Company]);
        assert_eq!(err.fields(), vec![CareerField::Company]);
        assert_eq!(err.field_message(CareerField::Company), "Company is required");
        assert_eq!(CareerValidationError::MissingEndDate.fields(), vec![CareerField::EndDate]);
        assert_eq!(CareerField::StartDate.to_string(), "start_date");
    }
}
