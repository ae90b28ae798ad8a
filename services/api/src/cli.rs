use crate::browse::{run_options, run_search, OptionsArgs, SearchArgs};
use crate::server;
use careerforge::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "careerforge",
    about = "Search, page through, and contact candidates from a CareerForge export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Filter the candidate export and print one page of results
    Search(SearchArgs),
    /// List the values accepted by the multi-select filters
    Options(OptionsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Candidate CSV export (defaults to CAREERFORGE_DATASET)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Results per page (defaults to CAREERFORGE_PAGE_SIZE)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub(crate) page_size: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Search(args) => run_search(args),
        Command::Options(args) => run_options(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerforge::candidates::GenderFilter;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_flags_parse_into_args() {
        let cli = Cli::try_parse_from([
            "careerforge",
            "search",
            "--role",
            "Data Entry",
            "--area",
            "Katargam",
            "--area",
            "Adajan",
            "--gender",
            "female",
            "--page",
            "2",
        ])
        .expect("search parses");

        let Some(Command::Search(args)) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.filters.role.as_deref(), Some("Data Entry"));
        assert_eq!(args.filters.areas, vec!["Katargam", "Adajan"]);
        assert_eq!(args.filters.gender, GenderFilter::Female);
        assert_eq!(args.page, 2);
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["careerforge"]).expect("no args parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let result = Cli::try_parse_from(["careerforge", "serve", "--page-size", "0"]);
        assert!(result.is_err());
    }
}
