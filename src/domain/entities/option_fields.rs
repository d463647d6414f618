use serde::{Deserialize, Deserializer};

use crate::errors::AppError;

/// Represents optional field semantics in PUT/PATCH requests.
///
/// - `Unchanged` → field absent from the body
/// - `SetToNull` → field present as `null`
/// - `SetToValue` → field present with a value
///
/// Absence is only detectable when the containing struct uses `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => OptionField::SetToValue(value),
            None => OptionField::SetToNull,
        })
    }
}

impl<T> OptionField<T> {
    /// True when `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// If `SetToValue`, returns a reference to inner value.
    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Resolves a non-nullable column: `null` is rejected for `field`.
    pub fn apply_required(self, field: &str, current: T) -> Result<T, AppError> {
        match self {
            Self::Unchanged => Ok(current),
            Self::SetToNull => Err(AppError::field(field, format!("{} cannot be null", field))),
            Self::SetToValue(v) => Ok(v),
        }
    }

    /// Resolves a nullable column.
    pub fn apply_nullable(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current,
            Self::SetToNull => None,
            Self::SetToValue(v) => Some(v),
        }
    }
}

impl<T> From<Option<Option<T>>> for OptionField<T> {
    fn from(opt: Option<Option<T>>) -> Self {
        match opt {
            None => OptionField::Unchanged,
            Some(None) => OptionField::SetToNull,
            Some(Some(v)) => OptionField::SetToValue(v),
        }
    }
}
