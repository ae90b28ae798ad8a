use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

use super::domain::{CandidateRecord, GenderFilter};

/// Distinct dataset values offered to the multi-select filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateOptions {
    pub roles: Vec<String>,
    pub areas: Vec<String>,
    pub experience: Vec<String>,
    pub religions: Vec<String>,
    pub genders: Vec<&'static str>,
}

impl CandidateOptions {
    pub fn collect<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CandidateRecord>,
    {
        let mut roles = DistinctValues::default();
        let mut areas = DistinctValues::default();
        let mut experience = DistinctValues::default();
        let mut religions = DistinctValues::default();

        for record in records {
            roles.push(record.role.as_deref());
            for fragment in record.area_fragments() {
                areas.push(Some(fragment));
            }
            experience.push(record.experience.as_deref());
            religions.push(record.religion.as_deref());
        }

        let mut experience = experience.into_values();
        experience.sort_by(|left, right| numeric_first(left, right));

        Self {
            roles: roles.into_sorted(),
            areas: areas.into_sorted(),
            experience,
            religions: religions.into_sorted(),
            genders: GenderFilter::ordered()
                .iter()
                .map(|gender| gender.label())
                .collect(),
        }
    }
}

/// Case-insensitive de-duplication that keeps the first spelling seen.
#[derive(Default)]
struct DistinctValues {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl DistinctValues {
    fn push(&mut self, value: Option<&str>) {
        let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
            return;
        };
        if self.seen.insert(value.to_lowercase()) {
            self.values.push(value.to_string());
        }
    }

    fn into_values(self) -> Vec<String> {
        self.values
    }

    fn into_sorted(self) -> Vec<String> {
        let mut values = self.values;
        values.sort_by_key(|value| value.to_lowercase());
        values
    }
}

fn numeric_first(left: &str, right: &str) -> Ordering {
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => left.to_lowercase().cmp(&right.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(role: &str, area: &str, experience: &str, religion: Option<&str>) -> CandidateRecord {
        CandidateRecord {
            role: Some(role.to_string()),
            area: Some(area.to_string()),
            experience: Some(experience.to_string()),
            religion: religion.map(str::to_string),
            ..CandidateRecord::default()
        }
    }

    #[test]
    fn options_are_distinct_and_sorted() {
        let records = vec![
            record("Telecaller", "Vesu, Adajan", "10", Some("Hindu")),
            record("data entry", "adajan", "2", Some("Muslim")),
            record("Data Entry", "Katargam , Rander", "Fresher", Some("hindu")),
            record("Driver", "", "2.5", None),
        ];

        let options = CandidateOptions::collect(&records);
        assert_eq!(options.roles, vec!["data entry", "Driver", "Telecaller"]);
        assert_eq!(options.areas, vec!["Adajan", "Katargam", "Rander", "Vesu"]);
        assert_eq!(options.experience, vec!["2", "2.5", "10", "Fresher"]);
        assert_eq!(options.religions, vec!["Hindu", "Muslim"]);
        assert_eq!(options.genders, vec!["All", "Male", "Female"]);
    }
}
