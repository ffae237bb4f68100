use std::borrow::Cow;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    domain::skills::{normalize_list, split_list},
    entities::option_fields::{OptionField, PatchString},
    utils::markdown::safe_markdown_to_html,
};

// ───── Constants ──────────────────────────────────────────────────────
const MAX_NAME_LENGTH: u64 = 120;
const MAX_SHORT_TEXT_LENGTH: u64 = 200;
const MAX_BIO_LENGTH: u64 = 2000;
const MAX_LIST_ITEMS: usize = 20;

static BATCH_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(19|20)[0-9]{2}$").expect("batch pattern is valid")
});

// ───── Mentor preferences ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mentor_availability", rename_all = "snake_case")]
pub enum Availability {
    #[serde(rename = "Evenings & Weekends")]
    EveningsAndWeekends,
    #[serde(rename = "Flexible during day")]
    FlexibleDuringDay,
    #[serde(rename = "Weekends only")]
    WeekendsOnly,
    #[serde(rename = "Limited")]
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "mentor_response_time", rename_all = "snake_case")]
pub enum ResponseTime {
    #[serde(rename = "Under 8 hours")]
    #[sqlx(rename = "under_8_hours")]
    Under8Hours,
    #[serde(rename = "12 - 24 hours")]
    #[sqlx(rename = "within_24_hours")]
    Within24Hours,
    #[serde(rename = "24 - 48 hours")]
    #[sqlx(rename = "within_48_hours")]
    Within48Hours,
    #[serde(rename = "Over 48 hours")]
    #[sqlx(rename = "over_48_hours")]
    Over48Hours,
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AlumniProfile {
    pub user_id: Uuid,
    pub display_name: String,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub linkedin_url: Option<String>,
    pub is_mentor: bool,
    pub availability: Option<Availability>,
    pub response_time: Option<ResponseTime>,
    pub expertise: Vec<String>,
    pub languages: Vec<String>,
    pub skills: Vec<String>,
    pub rating: f64,
    pub mentees_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape for the alumni directory listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DirectoryEntry {
    pub user_id: Uuid,
    pub display_name: String,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    pub skills: Vec<String>,
}

// ───── Profile completion ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCompletion {
    pub percent: u8,
    pub missing: Vec<&'static str>,
}

impl AlumniProfile {
    /// Share of the core fields an alumnus has filled in.
    pub fn completion(&self) -> ProfileCompletion {
        let checks: [(&'static str, bool); 8] = [
            ("display_name", !self.display_name.trim().is_empty()),
            ("batch", filled(&self.batch)),
            ("department", filled(&self.department)),
            ("title", filled(&self.title)),
            ("company", filled(&self.company)),
            ("location", filled(&self.location)),
            ("bio", filled(&self.bio)),
            ("linkedin_url", filled(&self.linkedin_url)),
        ];

        let done = checks.iter().filter(|(_, ok)| *ok).count();
        let missing = checks
            .iter()
            .filter(|(_, ok)| !*ok)
            .map(|(name, _)| *name)
            .collect();

        ProfileCompletion {
            percent: ((done * 100) / checks.len()) as u8,
            missing,
        }
    }
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: AlumniProfile,
    pub bio_html: Option<String>,
    pub completion: ProfileCompletion,
}

impl From<AlumniProfile> for ProfileResponse {
    fn from(profile: AlumniProfile) -> Self {
        let bio_html = profile.bio.as_deref().map(safe_markdown_to_html);
        let completion = profile.completion();
        ProfileResponse {
            profile,
            bio_html,
            completion,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SkillSuggestionsResponse {
    pub query: String,
    pub suggestions: Vec<&'static str>,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Either `"a, b, c"` or `["a", "b", "c"]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Csv(String),
    Items(Vec<String>),
}

impl ListInput {
    pub fn into_items(self) -> Vec<String> {
        match self {
            ListInput::Csv(raw) => normalize_list(split_list(&raw)),
            ListInput::Items(items) => normalize_list(items),
        }
    }
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(default)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub display_name: PatchString,

    #[validate(custom(function = "validate_optional_batch"))]
    pub batch: PatchString,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub department: PatchString,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub title: PatchString,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub company: PatchString,

    #[validate(length(max = MAX_SHORT_TEXT_LENGTH))]
    pub location: PatchString,

    #[validate(length(max = MAX_BIO_LENGTH))]
    pub bio: PatchString,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub linkedin_url: PatchString,

    pub is_mentor: OptionField<bool>,
    pub availability: OptionField<Availability>,
    pub response_time: OptionField<ResponseTime>,
    pub expertise: OptionField<ListInput>,
    pub languages: OptionField<ListInput>,
}

/// Normalized form of [`UpdateProfileRequest`] handed to the repository.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProfilePatch {
    pub display_name: PatchString,
    pub batch: PatchString,
    pub department: PatchString,
    pub title: PatchString,
    pub company: PatchString,
    pub location: PatchString,
    pub bio: PatchString,
    pub linkedin_url: PatchString,
    pub is_mentor: OptionField<bool>,
    pub availability: OptionField<Availability>,
    pub response_time: OptionField<ResponseTime>,
    pub expertise: OptionField<Vec<String>>,
    pub languages: OptionField<Vec<String>>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == ProfilePatch::default()
    }
}

impl TryFrom<UpdateProfileRequest> for ProfilePatch {
    type Error = validator::ValidationErrors;

    fn try_from(request: UpdateProfileRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        let mut errors = validator::ValidationErrors::new();
        let display_name = request.display_name.trimmed();
        if display_name.is_set_to_null() {
            errors.add("display_name", new_validation_error("required", "Display name cannot be cleared"));
        }
        if request.is_mentor.is_set_to_null() {
            errors.add("is_mentor", new_validation_error("required", "is_mentor must be true or false"));
        }

        let expertise = list_patch(request.expertise);
        let languages = list_patch(request.languages);
        for (field, list) in [("expertise", &expertise), ("languages", &languages)] {
            if list.value_ref().is_some_and(|items| items.len() > MAX_LIST_ITEMS) {
                errors.add(field, new_validation_error("too_many_items", "Too many entries"));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ProfilePatch {
            display_name,
            batch: request.batch.trimmed(),
            department: request.department.trimmed(),
            title: request.title.trimmed(),
            company: request.company.trimmed(),
            location: request.location.trimmed(),
            bio: request.bio.trimmed(),
            linkedin_url: request.linkedin_url.trimmed(),
            is_mentor: request.is_mentor,
            availability: request.availability,
            response_time: request.response_time,
            expertise,
            languages,
        })
    }
}

/// A cleared list is stored as an empty array, never NULL.
fn list_patch(field: OptionField<ListInput>) -> OptionField<Vec<String>> {
    match field {
        OptionField::SetToNull => OptionField::SetToValue(Vec::new()),
        other => other.map_value(ListInput::into_items),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddSkillRequest {
    #[validate(length(min = 1, message = "Skill cannot be empty"))]
    pub skill: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DirectoryQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SkillSuggestionQuery {
    pub q: String,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_optional_batch(value: &PatchString) -> Result<(), ValidationError> {
    match value.value_ref().map(|b| b.trim()) {
        Some(batch) if !batch.is_empty() && !BATCH_PATTERN.is_match(batch) => {
            Err(new_validation_error("invalid_batch", "Batch must be a four-digit year"))
        }
        _ => Ok(()),
    }
}

pub fn validate_optional_url_field(value: &PatchString) -> Result<(), ValidationError> {
    match value.value_ref().map(|u| u.trim()) {
        Some(url) if !url.is_empty() => validate_url(url),
        _ => Ok(()),
    }
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        Ok(_) => Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://")),
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}
