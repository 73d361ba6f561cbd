//! Planisphere - Entry Point
//!
//! Results go to stdout, diagnostics to stderr.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use planisphere::config::api;
use planisphere::formatters::{json, text};
use planisphere::{
    AppError, AuthorId, Config, FetchOptions, InputError, OpenAlexClient, SearchField, WorkFetcher,
    aggregate,
};

#[derive(Parser, Debug)]
#[command(name = "planisphere")]
#[command(about = "Frequentist coauthor-by-country aggregation for OpenAlex authors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Contact e-mail sent to OpenAlex (polite pool)
    #[arg(long, global = true, env = "OPENALEX_MAILTO")]
    mailto: Option<String>,

    /// Override the OpenAlex API base URL
    #[arg(long, global = true, env = "OPENALEX_BASE_URL")]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Anchor country and coauthor countries for one author
    Countries(CountriesArgs),
    /// Look up author ids by name
    Search(SearchArgs),
    /// Show one author's profile
    Author(AuthorArgs),
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// OpenAlex author id or URL (e.g. A41008148 or https://openalex.org/A41008148)
    author: String,

    /// Output JSON instead of text
    #[arg(long)]
    json: bool,

    /// Works per page (1-200)
    #[arg(long, default_value_t = api::DEFAULT_PER_PAGE)]
    per_page: u32,

    /// Maximum number of pages to request
    #[arg(long, default_value_t = api::DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// Pause between page requests, in milliseconds
    #[arg(long, default_value_t = api::PAGE_PAUSE_MS)]
    pause_ms: u64,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Author name to search for
    query: String,

    /// Number of candidates to show
    #[arg(long, default_value_t = 10)]
    limit: u32,

    /// Search only this author field (e.g. display_name)
    #[arg(long, conflicts_with = "autocomplete")]
    field: Option<String>,

    /// Fast type-ahead suggestions for a partial name
    #[arg(long)]
    autocomplete: bool,

    /// Output JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct AuthorArgs {
    /// OpenAlex author id or URL
    author: String,

    /// Output JSON instead of text
    #[arg(long)]
    json: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn build_client(cli: &Cli) -> Result<OpenAlexClient, AppError> {
    let mut config = Config::new(cli.mailto.clone().filter(|m| !m.trim().is_empty()));
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    Ok(OpenAlexClient::new(config)?)
}

async fn run_countries(cli: &Cli, args: &CountriesArgs) -> Result<String, AppError> {
    let author = AuthorId::parse(&args.author)?;
    let client = build_client(cli)?;

    let options = FetchOptions {
        per_page: args.per_page,
        max_pages: args.max_pages,
        pause: Duration::from_millis(args.pause_ms),
    };

    tracing::info!(author = %author, "Fetching works");
    let works = WorkFetcher::new(client).fetch_all_works(&author, options).await?;

    tracing::info!(works = works.len(), "Processing works");
    let result = aggregate(&author, &works);

    if args.json {
        let report = json::country_report(&author, &result);
        Ok(serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?)
    } else {
        Ok(text::format_country_report(&author, &result))
    }
}

async fn run_search(cli: &Cli, args: &SearchArgs) -> Result<String, AppError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(InputError::EmptyQuery.into());
    }

    let field = args.field.as_deref().map(SearchField::parse).transpose()?;
    let client = build_client(cli)?;

    if args.autocomplete {
        tracing::info!(query, "Autocompleting authors");
        let found = client.autocomplete_authors(query).await?;
        return if args.json {
            Ok(serde_json::to_string_pretty(&json::suggestions(&found.results))
                .map_err(anyhow::Error::from)?)
        } else {
            Ok(text::format_suggestions(query, &found.results))
        };
    }

    let per_page = args.limit.clamp(1, api::MAX_PER_PAGE);
    let found = match &field {
        Some(field) => {
            tracing::info!(query, %field, "Searching authors by field");
            client.search_authors_by_field(field, query, per_page).await?
        }
        None => {
            tracing::info!(query, "Searching authors");
            client.search_authors(query, per_page).await?
        }
    };

    if args.json {
        let candidates = json::author_candidates(&found.results);
        Ok(serde_json::to_string_pretty(&candidates).map_err(anyhow::Error::from)?)
    } else {
        Ok(text::format_author_candidates(query, &found.results))
    }
}

async fn run_author(cli: &Cli, args: &AuthorArgs) -> Result<String, AppError> {
    let author = AuthorId::parse(&args.author)?;
    let client = build_client(cli)?;

    tracing::info!(author = %author, "Fetching author");
    let profile = client.get_author(&author).await?;

    if args.json {
        Ok(serde_json::to_string_pretty(&json::author_detail(&profile))
            .map_err(anyhow::Error::from)?)
    } else {
        Ok(text::format_author_detail(&profile))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = u8::from(err.use_stderr());
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    init_tracing(&cli.log_level, cli.json_logs);

    let outcome = match &cli.command {
        Command::Countries(args) => run_countries(&cli, args).await,
        Command::Search(args) => run_search(&cli, args).await,
        Command::Author(args) => run_author(&cli, args).await,
    };

    match outcome {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(3))
        }
    }
}
