//! Candidate export loading, filtering, pagination, and outbound links.
//!
//! Records are read once per source into an immutable [`CandidateDataset`]
//! held by a [`DatasetCache`]; every search runs the pure filter and
//! pagination functions over that snapshot.

pub mod contact;
pub mod criteria;
pub mod domain;
pub mod filter;
pub mod links;
pub mod loader;
pub mod options;
pub mod pagination;
pub mod router;
pub mod service;
pub mod views;

pub use contact::{normalize_phone, MobileNumber};
pub use criteria::{FilterCriteria, ALL_SENTINEL};
pub use domain::{CandidateRecord, Gender, GenderFilter};
pub use filter::{filter_candidates, CandidateFilter};
pub use links::{
    open_resume, open_whatsapp, resume_link, whatsapp_link, whatsapp_number, LaunchError,
    LinkLauncher, RecordingLauncher, SystemBrowser,
};
pub use loader::{CandidateDataset, DataSourceError, DatasetCache, KNOWN_COLUMNS};
pub use options::CandidateOptions;
pub use pagination::{paginate, total_pages, Page, DEFAULT_PAGE_SIZE};
pub use router::candidate_router;
pub use service::{CandidateBrowser, SearchRequest, SearchResponse};
pub use views::CandidateView;
