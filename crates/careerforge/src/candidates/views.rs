use serde::Serialize;

use super::domain::CandidateRecord;
use super::links::{resume_link, whatsapp_link, whatsapp_number, MISSING_FIELD};

/// Display projection of a candidate with its outbound actions resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    pub name: String,
    pub role: String,
    pub location: String,
    pub area: String,
    pub mobile: String,
    pub experience: String,
    pub gender: String,
    pub religion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_url: Option<String>,
}

impl CandidateView {
    pub fn from_record(record: &CandidateRecord) -> Self {
        let whatsapp_url = whatsapp_number(record)
            .map(|mobile| whatsapp_link(record.name.as_deref(), &mobile));

        Self {
            name: display(record.name.as_deref()),
            role: display(record.role.as_deref()),
            location: display(record.city.as_deref()),
            area: display(record.area.as_deref()),
            mobile: display(record.contact.as_deref()),
            experience: display(record.experience.as_deref()),
            gender: record
                .gender
                .map(|gender| gender.label())
                .unwrap_or(MISSING_FIELD)
                .to_string(),
            religion: display(record.religion.as_deref()),
            resume_url: resume_link(record).map(str::to_string),
            whatsapp_url,
        }
    }
}

impl From<&CandidateRecord> for CandidateView {
    fn from(record: &CandidateRecord) -> Self {
        Self::from_record(record)
    }
}

fn display(value: Option<&str>) -> String {
    value.unwrap_or(MISSING_FIELD).to_string()
}
