use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};

/// Literal the UI uses for "no filter".
pub const ALL_SENTINEL: &str = "all";

/// One filter field's state.
///
/// `Unset` means the field was never initialised; `All` is the explicit "no
/// filter" choice. They serialise differently: `All` never reaches the
/// backend, `Unset` falls back to the field's declared default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    Unset,
    All,
    Text(String),
    Set(BTreeSet<String>),
}

impl FilterValue {
    /// Interprets raw UI input: `"all"`, blank and empty selections become `All`.
    pub fn from_input(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            FilterValue::All
        } else {
            FilterValue::Text(trimmed.to_string())
        }
    }

    /// Comma-separated input for multi-select fields.
    pub fn set_from_input(raw: &str) -> Self {
        let values: BTreeSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL_SENTINEL))
            .map(str::to_string)
            .collect();
        Self::from_set(values)
    }

    pub fn from_set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            FilterValue::All
        } else {
            FilterValue::Set(set)
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, FilterValue::Unset)
    }

    pub fn is_all(&self) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Text(text) => text.trim().is_empty(),
            FilterValue::Set(set) => set.is_empty(),
            FilterValue::Unset => false,
        }
    }

    /// Wire form of an active filter, `None` for `All` and `Unset`.
    pub fn to_param(&self) -> Option<String> {
        match self {
            FilterValue::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            FilterValue::Set(set) if !set.is_empty() => {
                Some(set.iter().cloned().collect::<Vec<_>>().join(","))
            }
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(text) => Some(text.as_str()).filter(|t| !t.trim().is_empty()),
            _ => None,
        }
    }
}

impl Serialize for FilterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterValue::Unset => serializer.serialize_none(),
            FilterValue::All => serializer.serialize_str(ALL_SENTINEL),
            FilterValue::Text(text) => serializer.serialize_str(text),
            FilterValue::Set(set) => set.serialize(serializer),
        }
    }
}

/// Field name to current value, for one listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria(BTreeMap<String, FilterValue>);

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> &FilterValue {
        static UNSET: FilterValue = FilterValue::Unset;
        self.0.get(field).unwrap_or(&UNSET)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).as_text()
    }

    pub fn set(&mut self, field: impl Into<String>, value: FilterValue) {
        self.0.insert(field.into(), value);
    }

    /// Every known field back to `All`.
    pub fn reset<'a>(&mut self, fields: impl IntoIterator<Item = &'a str>) {
        self.0.clear();
        for field in fields {
            self.0.insert(field.to_string(), FilterValue::All);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
