use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::ValidateLength;

/// Tri-state field of a PATCH body.
///
/// - absent → `Unchanged` (needs `#[serde(default)]` on the field or struct)
/// - `null` → `SetToNull`
/// - value → `SetToValue`
#[derive(Debug, Clone, PartialEq)]
pub enum OptionField<T> {
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<T> Default for OptionField<T> {
    fn default() -> Self {
        OptionField::Unchanged
    }
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> Serialize for OptionField<T>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value_ref().serialize(serializer)
    }
}

// ---------------------- Validation support ----------------------

impl<T> ValidateLength<u64> for OptionField<T>
where
    T: ValidateLength<u64>,
{
    fn length(&self) -> Option<u64> {
        match self {
            OptionField::SetToValue(value) => value.length(),
            _ => None,
        }
    }

    fn validate_length(&self, min: Option<u64>, max: Option<u64>, equal: Option<u64>) -> bool {
        match self {
            OptionField::SetToValue(value) => value.validate_length(min, max, equal),
            _ => true,
        }
    }
}

// ---------------------- Helpers ----------------------

impl<T> OptionField<T> {
    /// - `None` → unchanged
    /// - `Some(None)` → set null
    /// - `Some(Some(&T))` → set to value
    pub fn as_ref_option(&self) -> Option<Option<&T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(value) => Some(Some(value)),
        }
    }

    pub fn map_value<U, F: FnOnce(T) -> U>(self, f: F) -> OptionField<U> {
        match self {
            Self::Unchanged => OptionField::Unchanged,
            Self::SetToNull => OptionField::SetToNull,
            Self::SetToValue(v) => OptionField::SetToValue(f(v)),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn is_set_to_null(&self) -> bool {
        matches!(self, Self::SetToNull)
    }

    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl OptionField<String> {
    /// Trims a provided value; a blank string becomes `SetToNull`.
    pub fn trimmed(self) -> Self {
        match self {
            OptionField::SetToValue(v) => {
                let t = v.trim();
                if t.is_empty() {
                    OptionField::SetToNull
                } else {
                    OptionField::SetToValue(t.to_string())
                }
            }
            other => other,
        }
    }
}

pub type PatchString = OptionField<String>;
