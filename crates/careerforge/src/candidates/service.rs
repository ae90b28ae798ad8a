use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::criteria::FilterCriteria;
use super::domain::CandidateRecord;
use super::filter::filter_candidates;
use super::loader::{CandidateDataset, DataSourceError, DatasetCache};
use super::options::CandidateOptions;
use super::pagination::{paginate, Page, DEFAULT_PAGE_SIZE};
use super::views::CandidateView;

impl CandidateDataset {
    /// Matching records in dataset order.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&CandidateRecord> {
        filter_candidates(self.records(), criteria)
    }

    /// Filters, then returns the requested page of matches.
    pub fn search(
        &self,
        criteria: &FilterCriteria,
        page_number: usize,
        page_size: usize,
    ) -> Page<&CandidateRecord> {
        let matches = self.filter(criteria);
        debug!(
            origin = self.origin(),
            total = self.len(),
            matched = matches.len(),
            page_number,
            "filtered candidates"
        );
        paginate(matches, page_number, page_size)
    }

    pub fn options(&self) -> CandidateOptions {
        CandidateOptions::collect(self.records())
    }
}

/// Criteria plus the page the caller wants to see.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(flatten)]
    pub criteria: FilterCriteria,
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

/// One rendered page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub role: String,
    #[serde(flatten)]
    pub page: Page<CandidateView>,
}

/// Serves searches against one export through a shared dataset cache.
#[derive(Debug, Clone)]
pub struct CandidateBrowser {
    cache: Arc<DatasetCache>,
    dataset_path: PathBuf,
    page_size: usize,
}

impl CandidateBrowser {
    pub fn new(cache: Arc<DatasetCache>, dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            cache,
            dataset_path: dataset_path.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn dataset(&self) -> Result<Arc<CandidateDataset>, DataSourceError> {
        self.cache.load(&self.dataset_path)
    }

    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse, DataSourceError> {
        let dataset = self.dataset()?;
        let page = dataset
            .search(&request.criteria, request.page, self.page_size)
            .map(CandidateView::from_record);

        Ok(SearchResponse {
            role: request.criteria.role_label().to_string(),
            page,
        })
    }

    pub fn options(&self) -> Result<CandidateOptions, DataSourceError> {
        Ok(self.dataset()?.options())
    }

    /// Forgets the cached snapshot so the next call re-reads the export.
    pub fn reload(&self) -> Result<Arc<CandidateDataset>, DataSourceError> {
        self.cache.evict(&self.dataset_path);
        self.dataset()
    }
}
