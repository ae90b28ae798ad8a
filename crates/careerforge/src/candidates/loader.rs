use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, info, warn};

use super::domain::{CandidateRecord, Gender};

/// Columns the browser understands. Anything else in the export is ignored.
pub const KNOWN_COLUMNS: [&str; 10] = [
    "Name",
    "Job Type",
    "City",
    "Area",
    "Experience",
    "Contact",
    "Gender",
    "Religion",
    "Resume",
    "resume_url",
];

/// Fatal failure to load a candidate export. Nothing is cached when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("failed to read candidate dataset {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid candidate CSV data in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },
    #[error("candidate dataset {origin} has no header row")]
    MissingHeader { origin: String },
}

/// Immutable snapshot of one candidate export.
#[derive(Debug, Clone)]
pub struct CandidateDataset {
    origin: String,
    loaded_at: DateTime<Utc>,
    columns: Vec<String>,
    records: Vec<CandidateRecord>,
}

impl CandidateDataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|source| DataSourceError::Io {
            origin: origin.clone(),
            source,
        })?;
        Self::from_reader(file, origin)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        origin: impl Into<String>,
    ) -> Result<Self, DataSourceError> {
        let origin = origin.into();
        let csv_error = |source| DataSourceError::Csv {
            origin: origin.clone(),
            source,
        };

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        if columns.iter().all(|column| column.is_empty()) {
            return Err(DataSourceError::MissingHeader { origin });
        }
        if !columns
            .iter()
            .any(|column| KNOWN_COLUMNS.contains(&column.as_str()))
        {
            warn!(%origin, ?columns, "candidate dataset has none of the recognised columns");
        }

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<CandidateRow>() {
            records.push(row.map_err(csv_error)?.into_record());
        }

        info!(%origin, rows = records.len(), "loaded candidate dataset");

        Ok(Self {
            origin,
            loaded_at: Utc::now(),
            columns,
            records,
        })
    }

    /// Path or label the snapshot was read from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|known| known == column)
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load-once store of dataset snapshots keyed by source path.
///
/// The first successful load of a path is frozen and shared; later calls hand
/// out the same `Arc` until the entry is evicted or the cache is cleared.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: RwLock<HashMap<PathBuf, Arc<CandidateDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache shared by every caller that does not own one.
    pub fn global() -> Arc<DatasetCache> {
        static GLOBAL: OnceLock<Arc<DatasetCache>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(DatasetCache::new())).clone()
    }

    pub fn load<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Arc<CandidateDataset>, DataSourceError> {
        let path = path.as_ref();
        if let Some(dataset) = self.get(path) {
            debug!(path = %path.display(), "candidate dataset cache hit");
            return Ok(dataset);
        }

        debug!(path = %path.display(), "candidate dataset cache miss");
        let loaded = Arc::new(CandidateDataset::from_path(path)?);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // A concurrent loader may have won the race; keep its snapshot.
        let dataset = entries
            .entry(path.to_path_buf())
            .or_insert(loaded)
            .clone();
        Ok(dataset)
    }

    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<Arc<CandidateDataset>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path.as_ref())
            .cloned()
    }

    /// Drops one snapshot so the next `load` re-reads the file.
    pub fn evict<P: AsRef<Path>>(&self, path: P) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path.as_ref())
            .is_some()
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Job Type", default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(rename = "Area", default, deserialize_with = "empty_string_as_none")]
    area: Option<String>,
    #[serde(rename = "Experience", default, deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    #[serde(rename = "Contact", default, deserialize_with = "empty_string_as_none")]
    contact: Option<String>,
    #[serde(rename = "Gender", default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(rename = "Religion", default, deserialize_with = "empty_string_as_none")]
    religion: Option<String>,
    #[serde(rename = "Resume", default, deserialize_with = "empty_string_as_none")]
    resume: Option<String>,
    #[serde(rename = "resume_url", default, deserialize_with = "empty_string_as_none")]
    resume_url: Option<String>,
}

impl CandidateRow {
    fn into_record(self) -> CandidateRecord {
        CandidateRecord {
            name: self.name,
            role: self.role,
            city: self.city,
            area: self.area,
            experience: self.experience,
            contact: self.contact,
            gender: self.gender.as_deref().map(Gender::from_cell),
            religion: self.religion,
            resume_url: self.resume.or(self.resume_url),
        }
    }
}

/// Blank cells and `NaN` markers become `None`.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| {
        let trimmed = value.trim();
        !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("nan")
    }))
}
