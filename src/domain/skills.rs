use derive_more::Display;

/// Skills offered as suggestions while an alumnus types into the skill input.
pub const SKILL_CATALOG: &[&str] = &[
    "Corporate Law",
    "Financial Analysis",
    "Mergers & Acquisitions",
    "Litigation",
    "Contract Negotiation",
    "Tax Law",
    "Python",
    "Data Science",
    "Project Management",
    "Agile Leadership",
    "Product Management",
    "FinTech",
    "Cloud Computing",
    "AI/ML",
];

pub const MAX_SUGGESTIONS: usize = 8;
pub const MAX_SKILL_LENGTH: usize = 60;
pub const MAX_SKILLS: usize = 50;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum SkillError {
    #[display("Skill cannot be empty")]
    Blank,

    #[display("Skill must be at most {MAX_SKILL_LENGTH} characters")]
    TooLong,

    #[display("A profile can list at most {MAX_SKILLS} skills")]
    TooMany,
}

impl std::error::Error for SkillError {}

/// Catalog skills containing `query` (case-insensitive) that the alumnus
/// does not list yet, in catalog order.
pub fn suggest_skills(query: &str, current: &[String]) -> Vec<&'static str> {
    let needle = query.trim().to_lowercase();

    SKILL_CATALOG
        .iter()
        .copied()
        .filter(|skill| skill.to_lowercase().contains(&needle))
        .filter(|skill| !contains_skill(current, skill))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Trimmed skill name, rejecting blank and overlong input.
pub fn normalize_skill(raw: &str) -> Result<&str, SkillError> {
    let skill = raw.trim();
    if skill.is_empty() {
        return Err(SkillError::Blank);
    }
    if skill.chars().count() > MAX_SKILL_LENGTH {
        return Err(SkillError::TooLong);
    }
    Ok(skill)
}

/// Adds a trimmed skill. Returns `Ok(false)` when it is already listed.
pub fn add_skill(skills: &mut Vec<String>, raw: &str) -> Result<bool, SkillError> {
    let skill = normalize_skill(raw)?;
    if contains_skill(skills, skill) {
        return Ok(false);
    }
    if skills.len() >= MAX_SKILLS {
        return Err(SkillError::TooMany);
    }

    skills.push(skill.to_string());
    Ok(true)
}

/// Removes a skill, ignoring case. Returns whether anything was removed.
pub fn remove_skill(skills: &mut Vec<String>, name: &str) -> bool {
    let before = skills.len();
    let name = name.trim().to_lowercase();
    skills.retain(|s| s.to_lowercase() != name);
    skills.len() != before
}

/// One change to a profile's skill list, applied to the freshly locked row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillEdit {
    Add(String),
    Remove(String),
}

/// Skill list after an edit, and whether the edit changed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEditOutcome {
    pub skills: Vec<String>,
    pub changed: bool,
}

impl SkillEdit {
    /// Applies the edit in place. Returns whether the list changed.
    pub fn apply(&self, skills: &mut Vec<String>) -> Result<bool, SkillError> {
        match self {
            SkillEdit::Add(skill) => add_skill(skills, skill),
            SkillEdit::Remove(name) => Ok(remove_skill(skills, name)),
        }
    }
}

/// Splits comma-separated input, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Trims entries and drops empty ones and case-insensitive repeats.
pub fn normalize_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        if !item.is_empty() && !contains_skill(&out, item) {
            out.push(item.to_string());
        }
    }
    out
}

fn contains_skill(skills: &[String], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    skills.iter().any(|s| s.to_lowercase() == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_match_substring_ignoring_case() {
        assert_eq!(suggest_skills("law", &[]), vec!["Corporate Law", "Tax Law"]);
        assert_eq!(suggest_skills("PYTH", &[]), vec!["Python"]);
    }

    #[test]
    fn edits_apply_to_the_given_list() {
        let mut skills = vec!["Python".to_string()];

        assert_eq!(SkillEdit::Add("Rust".into()).apply(&mut skills), Ok(true));
        assert_eq!(SkillEdit::Add("rust".into()).apply(&mut skills), Ok(false));
        assert_eq!(SkillEdit::Remove("PYTHON".into()).apply(&mut skills), Ok(true));
        assert_eq!(SkillEdit::Remove("Go".into()).apply(&mut skills), Ok(false));
        assert_eq!(skills, vec!["Rust"]);
    }

    #[test]
    fn suggestions_skip_skills_already_listed() {
        let current = vec!["tax law".to_string()];
        assert_eq!(suggest_skills("law", &current), vec!["Corporate Law"]);
    }

    #[test]
    fn suggestions_are_capped() {
        let all = suggest_skills("", &[]);
        assert_eq!(all.len(), MAX_SUGGESTIONS);
        assert_eq!(all[0], "Corporate Law");
    }

    #[test]
    fn add_skill_trims_and_dedupes() {
        let mut skills = vec!["Python".to_string()];
        assert_eq!(add_skill(&mut skills, "  Rust "), Ok(true));
        assert_eq!(add_skill(&mut skills, "python"), Ok(false));
        assert_eq!(add_skill(&mut skills, "   "), Err(SkillError::Blank));
        assert_eq!(skills, vec!["Python", "Rust"]);
    }

    #[test]
    fn add_skill_enforces_limits() {
        let mut skills = vec![];
        assert_eq!(add_skill(&mut skills, &"x".repeat(MAX_SKILL_LENGTH + 1)), Err(SkillError::TooLong));

        let mut full: Vec<String> = (0..MAX_SKILLS).map(|i| format!("skill-{i}")).collect();
        assert_eq!(add_skill(&mut full, "one more"), Err(SkillError::TooMany));
    }

    #[test]
    fn remove_skill_ignores_case() {
        let mut skills = vec!["Python".to_string(), "FinTech".to_string()];
        assert!(remove_skill(&mut skills, "fintech"));
        assert!(!remove_skill(&mut skills, "Go"));
        assert_eq!(skills, vec!["Python"]);
    }

    #[test]
    fn comma_lists_are_split_and_normalized() {
        assert_eq!(split_list("Python, , Data Science ,"), vec!["Python", "Data Science"]);
        assert_eq!(normalize_list(["English", " english ", "", "Hindi"]), vec!["English", "Hindi"]);
    }
}
