use serde::{Deserialize, Serialize};

use super::domain::GenderFilter;

/// Sentinel accepted by the religion selector meaning "no constraint".
pub const ALL_SENTINEL: &str = "All";

/// Active filter values for one evaluation pass.
///
/// Every field defaults to "no constraint"; blank strings and empty sets are
/// treated the same as unset values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the "Job Type" column.
    pub role: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    /// Exact match after phone normalization.
    pub contact: Option<String>,
    pub areas: Vec<String>,
    pub experience: Vec<String>,
    pub religion: Vec<String>,
    pub gender: GenderFilter,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn with_areas<I, S>(mut self, areas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.areas = areas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_experience<I, S>(mut self, experience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.experience = experience.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_religion<I, S>(mut self, religion: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.religion = religion.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gender(mut self, gender: GenderFilter) -> Self {
        self.gender = gender;
        self
    }

    /// Role text for display headings, trimmed; empty when unset.
    pub fn role_label(&self) -> &str {
        self.role.as_deref().map(str::trim).unwrap_or_default()
    }

    /// True when no field narrows the dataset.
    pub fn is_unconstrained(&self) -> bool {
        super::filter::CandidateFilter::compile(self).is_identity()
    }
}
