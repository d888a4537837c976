//! Portfolio CLI
//!
//! Builds the static site, renders single routes, and inspects content.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use portfolio::{
    error::Result,
    models::{Config, Profile, Project},
    pipeline::{self, BuildOptions, Facet, ListingQuery, Site},
    services::{ContentService, FixtureSource, SanitySource},
    storage::{LocalStorage, SiteStorage},
};

/// Portfolio - CMS-backed personal site renderer
#[derive(Parser, Debug)]
#[command(
    name = "portfolio",
    version,
    about = "Render a CMS-backed personal portfolio"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/portfolio.toml")]
    config: PathBuf,

    /// Use the bundled sample content instead of the CMS
    #[arg(long)]
    offline: bool,

    /// Read content from a JSON fixture file instead of the CMS
    #[arg(long, conflicts_with = "offline")]
    fixture: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every page into the output directory
    Build {
        /// Write even when the content guard trips
        #[arg(long)]
        force: bool,

        /// Output directory (default: site.output_dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Render one route to stdout, e.g. `/projects?category=Mobile`
    Render { path: String },

    /// List projects matching the given facets
    Projects {
        #[arg(long, default_value = pipeline::ALL)]
        category: String,

        #[arg(long, default_value = pipeline::ALL)]
        status: String,

        #[arg(long, default_value = "")]
        search: String,
    },

    /// List project categories
    Categories,

    /// Search projects through the content store
    Search { term: String },

    /// Show project statistics
    Stats,

    /// Validate configuration and content
    Validate,

    /// Show information about the last build
    Info {
        /// Output directory (default: site.output_dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

/// Pick the content backend from the command line flags.
fn content_service(cli: &Cli, config: &Config) -> Result<ContentService> {
    if let Some(path) = &cli.fixture {
        log::info!("Reading content from {}", path.display());
        return Ok(ContentService::from_source(FixtureSource::load(path)?));
    }
    if cli.offline {
        log::info!("Offline mode: using sample content");
        return Ok(ContentService::from_source(FixtureSource::sample()));
    }
    log::info!(
        "Reading content from CMS project '{}' ({})",
        config.cms.project_id,
        config.cms.dataset
    );
    Ok(ContentService::from_source(SanitySource::new(config)?))
}

fn print_projects(projects: &[Project]) {
    for project in projects {
        println!(
            "{:<28} {:<20} {:<12} {}",
            project.slug,
            project.category,
            project.status.label(),
            project.title
        );
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());
    let output_dir = PathBuf::from(&config.site.output_dir);

    match &cli.command {
        Command::Build { force, out } => {
            let profile = Profile::load_or_default(&config.site.profile_file);
            let content = content_service(&cli, &config)?;
            let site = Site::new(content, Arc::new(config), profile);
            let storage = LocalStorage::new(out.clone().unwrap_or(output_dir));

            pipeline::run_build(&site, &storage, &BuildOptions { force: *force }).await?;
            log::info!("Site written to {}", storage.root().display());
        }

        Command::Render { path } => {
            let profile = Profile::load_or_default(&config.site.profile_file);
            let content = content_service(&cli, &config)?;
            let site = Site::new(content, Arc::new(config), profile);

            let outcome = site.render(path).await;
            if !outcome.is_found() {
                log::warn!("No page for {path}; rendered the not-found page");
            }
            println!("{}", outcome.html());
        }

        Command::Projects {
            category,
            status,
            search,
        } => {
            let content = content_service(&cli, &config)?;
            let query = ListingQuery::new(category, status, search);
            // The store narrows by category; status and search run locally.
            let projects = match &query.category {
                Facet::Only(category) => content.projects_in_category(category).await,
                Facet::All => content.projects().await,
            };
            let shown = pipeline::filter_items(&projects, &query);

            println!("Showing {} of {} projects", shown.len(), projects.len());
            print_projects(&shown);
        }

        Command::Categories => {
            let content = content_service(&cli, &config)?;
            for category in content.project_categories().await {
                println!("{category}");
            }
        }

        Command::Search { term } => {
            let content = content_service(&cli, &config)?;
            let found = content.search_projects(term).await;
            println!("{} projects match '{}'", found.len(), term.trim());
            print_projects(&found);
        }

        Command::Stats => {
            let content = content_service(&cli, &config)?;
            let stats = content.project_stats().await;
            println!("Total:       {}", stats.total);
            println!("Completed:   {}", stats.completed);
            println!("In progress: {}", stats.in_progress);
            println!("Planned:     {}", stats.planned);
            println!("Featured:    {}", stats.featured);
        }

        Command::Validate => {
            let content = content_service(&cli, &config)?;
            let (projects, articles) = futures::join!(content.projects(), content.articles());
            pipeline::run_validate(&config, &projects, &articles)?;
            log::info!("All validations passed!");
        }

        Command::Info { out } => {
            let storage = LocalStorage::new(out.clone().unwrap_or(output_dir));
            log::info!("Output directory: {}", storage.root().display());

            match storage.load_manifest().await? {
                Some(manifest) => {
                    log::info!("Last build: {}", manifest.generated_at.to_rfc3339());
                    log::info!("Records: {}", manifest.records);
                    log::info!("Pages: {}", manifest.pages.len());
                }
                None => log::info!("No build found yet."),
            }
        }
    }

    Ok(())
}
