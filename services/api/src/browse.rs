use careerforge::candidates::{
    open_resume, open_whatsapp, CandidateBrowser, CandidateOptions, CandidateView, DatasetCache,
    FilterCriteria, GenderFilter, LinkLauncher, SearchRequest, SearchResponse, SystemBrowser,
};
use careerforge::config::AppConfig;
use careerforge::error::AppError;
use careerforge::telemetry;
use clap::Args;
use std::fmt;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Job type to search for (substring, case-insensitive)
    #[arg(long)]
    pub(crate) role: Option<String>,
    /// Candidate name (substring)
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// City (substring)
    #[arg(long)]
    pub(crate) city: Option<String>,
    /// Exact phone number; spaces, hyphens and +91 are ignored
    #[arg(long)]
    pub(crate) contact: Option<String>,
    /// Area to include; repeat for several
    #[arg(long = "area")]
    pub(crate) areas: Vec<String>,
    /// Experience value to include; repeat for several
    #[arg(long = "experience")]
    pub(crate) experience: Vec<String>,
    /// Religion to include; repeat for several, or pass All
    #[arg(long = "religion")]
    pub(crate) religion: Vec<String>,
    /// All, Male or Female
    #[arg(long, default_value_t = GenderFilter::All)]
    pub(crate) gender: GenderFilter,
}

impl FilterArgs {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            role: self.role,
            name: self.name,
            city: self.city,
            contact: self.contact,
            areas: self.areas,
            experience: self.experience,
            religion: self.religion,
            gender: self.gender,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    #[command(flatten)]
    pub(crate) filters: FilterArgs,
    /// Candidate CSV export (defaults to CAREERFORGE_DATASET)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Page to show; clamped to the available pages
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Results per page (defaults to CAREERFORGE_PAGE_SIZE)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub(crate) page_size: Option<u16>,
    /// Print the page as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Open the resume of the N-th candidate on the shown page
    #[arg(long, value_name = "N")]
    pub(crate) open_resume: Option<usize>,
    /// Open a WhatsApp chat with the N-th candidate on the shown page
    #[arg(long, value_name = "N")]
    pub(crate) open_whatsapp: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct OptionsArgs {
    /// Candidate CSV export (defaults to CAREERFORGE_DATASET)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the options as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

fn browser_from_config(
    dataset: Option<PathBuf>,
    page_size: Option<u16>,
) -> Result<CandidateBrowser, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_for_cli(&config.telemetry)?;

    let path = dataset.unwrap_or(config.dataset.path);
    let page_size = page_size.map_or(config.dataset.page_size, usize::from);
    Ok(CandidateBrowser::new(DatasetCache::global(), path).with_page_size(page_size))
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        filters,
        dataset,
        page,
        page_size,
        json,
        open_resume,
        open_whatsapp,
    } = args;

    let browser = browser_from_config(dataset, page_size)?;
    let request = SearchRequest {
        criteria: filters.into_criteria(),
        page,
    };
    let response = browser.search(&request)?;

    if json {
        let rendered = serde_json::to_string_pretty(&response).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", PageReport(&response));
    }

    let launcher = SystemBrowser;
    if let Some(position) = open_resume {
        launch_resume(&launcher, &response, position)?;
    }
    if let Some(position) = open_whatsapp {
        launch_whatsapp(&launcher, &response, position)?;
    }

    Ok(())
}

pub(crate) fn run_options(args: OptionsArgs) -> Result<(), AppError> {
    let browser = browser_from_config(args.dataset, None)?;
    let options = browser.options()?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&options).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", OptionsReport(&options));
    }
    Ok(())
}

fn candidate_at(response: &SearchResponse, position: usize) -> Result<&CandidateView, AppError> {
    let first = response.page.first_position();
    position
        .checked_sub(first)
        .and_then(|offset| response.page.items.get(offset))
        .ok_or_else(|| {
            AppError::Usage(format!(
                "candidate #{position} is not on page {} (showing #{first}-#{})",
                response.page.page_number,
                first + response.page.items.len().saturating_sub(1)
            ))
        })
}

fn launch_resume<L: LinkLauncher>(
    launcher: &L,
    response: &SearchResponse,
    position: usize,
) -> Result<(), AppError> {
    let candidate = candidate_at(response, position)?;
    let url = candidate.resume_url.as_deref().unwrap_or_default();
    if !open_resume(launcher, url)? {
        println!("No resume on file for {}", candidate.name);
    }
    Ok(())
}

fn launch_whatsapp<L: LinkLauncher>(
    launcher: &L,
    response: &SearchResponse,
    position: usize,
) -> Result<(), AppError> {
    let candidate = candidate_at(response, position)?;
    if !open_whatsapp(launcher, Some(candidate.name.as_str()), &candidate.mobile)? {
        println!("No WhatsApp number for {}", candidate.name);
    }
    Ok(())
}

/// Text rendering of one page of results, one card per candidate.
struct PageReport<'a>(&'a SearchResponse);

impl fmt::Display for PageReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.0;
        let page = &response.page;
        let role = if response.role.is_empty() {
            "any"
        } else {
            response.role.as_str()
        };

        writeln!(f, "Showing {} result(s) for role: {role}", page.total_results)?;
        writeln!(f, "Page {} of {}", page.page_number, page.total_pages)?;

        for (offset, candidate) in page.items.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "#{} {}", page.first_position() + offset, candidate.name)?;
            writeln!(f, "  Role:       {}", candidate.role)?;
            writeln!(f, "  Location:   {}", candidate.location)?;
            writeln!(f, "  Area:       {}", candidate.area)?;
            writeln!(f, "  Mobile.No:  {}", candidate.mobile)?;
            writeln!(f, "  Experience: {}", candidate.experience)?;
            writeln!(f, "  Gender:     {}", candidate.gender)?;
            writeln!(
                f,
                "  Resume:     {}",
                candidate.resume_url.as_deref().unwrap_or("No Resume")
            )?;
            writeln!(
                f,
                "  WhatsApp:   {}",
                candidate
                    .whatsapp_url
                    .as_deref()
                    .unwrap_or("No WhatsApp Number")
            )?;
        }

        if page.has_next() {
            writeln!(f, "\nMore results: --page {}", page.page_number + 1)?;
        }
        Ok(())
    }
}

struct OptionsReport<'a>(&'a CandidateOptions);

impl fmt::Display for OptionsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = self.0;
        for (label, values) in [
            ("Roles", &options.roles),
            ("Areas", &options.areas),
            ("Experience", &options.experience),
            ("Religions", &options.religions),
        ] {
            writeln!(f, "{label} ({}):", values.len())?;
            for value in values {
                writeln!(f, "  - {value}")?;
            }
        }
        writeln!(f, "Genders: {}", options.genders.join(", "))
    }
}
