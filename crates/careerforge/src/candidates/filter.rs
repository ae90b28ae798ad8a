use super::contact::normalize_phone;
use super::criteria::{FilterCriteria, ALL_SENTINEL};
use super::domain::{CandidateRecord, GenderFilter};

/// Criteria folded into lowercase needles so each record is checked without
/// re-normalizing the filter inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    role: Option<String>,
    name: Option<String>,
    city: Option<String>,
    contact: Option<String>,
    areas: Vec<String>,
    experience: Vec<String>,
    religion: Vec<String>,
    gender: GenderFilter,
}

impl CandidateFilter {
    pub fn compile(criteria: &FilterCriteria) -> Self {
        let religion_is_all = criteria
            .religion
            .iter()
            .any(|value| value.trim().eq_ignore_ascii_case(ALL_SENTINEL));

        Self {
            role: needle(criteria.role.as_deref()),
            name: needle(criteria.name.as_deref()),
            city: needle(criteria.city.as_deref()),
            contact: criteria
                .contact
                .as_deref()
                .map(normalize_phone)
                .filter(|digits| !digits.is_empty()),
            areas: selections(&criteria.areas),
            experience: selections(&criteria.experience),
            religion: if religion_is_all {
                Vec::new()
            } else {
                selections(&criteria.religion)
            },
            gender: criteria.gender,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.role.is_none()
            && self.name.is_none()
            && self.city.is_none()
            && self.contact.is_none()
            && self.areas.is_empty()
            && self.experience.is_empty()
            && self.religion.is_empty()
            && self.gender == GenderFilter::All
    }

    /// Conjunction of every active predicate, cheapest first.
    pub fn matches(&self, record: &CandidateRecord) -> bool {
        self.gender.accepts(record.gender)
            && self.contact_matches(record)
            && contains_folded(self.role.as_deref(), record.role.as_deref())
            && contains_folded(self.name.as_deref(), record.name.as_deref())
            && contains_folded(self.city.as_deref(), record.city.as_deref())
            && self.religion_matches(record)
            && self.experience_matches(record)
            && self.areas_match(record)
    }

    fn contact_matches(&self, record: &CandidateRecord) -> bool {
        let Some(wanted) = self.contact.as_deref() else {
            return true;
        };
        record
            .contact
            .as_deref()
            .is_some_and(|stored| normalize_phone(stored) == wanted)
    }

    fn religion_matches(&self, record: &CandidateRecord) -> bool {
        if self.religion.is_empty() {
            return true;
        }
        let Some(religion) = record.religion.as_deref() else {
            return false;
        };
        let religion = religion.to_lowercase();
        self.religion
            .iter()
            .any(|selected| religion.contains(selected.as_str()))
    }

    fn experience_matches(&self, record: &CandidateRecord) -> bool {
        if self.experience.is_empty() {
            return true;
        }
        let Some(experience) = record.experience.as_deref() else {
            return false;
        };
        let experience = experience.trim().to_lowercase();
        self.experience
            .iter()
            .any(|selected| same_experience(&experience, selected))
    }

    fn areas_match(&self, record: &CandidateRecord) -> bool {
        if self.areas.is_empty() {
            return true;
        }
        record.area_fragments().any(|fragment| {
            let fragment = fragment.to_lowercase();
            self.areas
                .iter()
                .any(|selected| fragment.contains(selected.as_str()))
        })
    }
}

/// Returns the records satisfying `criteria`, in their original order.
pub fn filter_candidates<'a, I>(
    records: I,
    criteria: &FilterCriteria,
) -> Vec<&'a CandidateRecord>
where
    I: IntoIterator<Item = &'a CandidateRecord>,
{
    let filter = CandidateFilter::compile(criteria);
    records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect()
}

fn needle(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn selections(values: &[String]) -> Vec<String> {
    let mut folded: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if let Some(value) = needle(Some(value.as_str())) {
            if !folded.contains(&value) {
                folded.push(value);
            }
        }
    }
    folded
}

/// `None` needle matches everything; a missing field never matches a needle.
fn contains_folded(needle: Option<&str>, haystack: Option<&str>) -> bool {
    match (needle, haystack) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(needle), Some(haystack)) => haystack.to_lowercase().contains(needle),
    }
}

/// Numbers compare by value; anything else matches when `selected` is contained in `stored`.
fn same_experience(stored: &str, selected: &str) -> bool {
    match (stored.parse::<f64>(), selected.parse::<f64>()) {
        (Ok(left), Ok(right)) => left == right,
        _ => stored.contains(selected),
    }
}
