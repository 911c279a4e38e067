use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use eeri::commands::{SearchOptions, search};
use eeri::search::{SearchFilter, VariantPolicy};

/// eeri - Enterprise Edition Release Index search
///
/// Locate installable SDK bundles in a release catalog.
///
/// The catalog document itself is produced by a separate fetch step; hand it
/// over as a file or pipe it on standard input.
///
/// Examples:
///   eeri search --catalog versions.json      # newest first, every build
///   curl -s $CATALOG_URL | eeri search --release
#[derive(Parser, Debug)]
#[command(author, version = env!("EERI_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Search a catalog for installable SDK bundles
    Search(SearchArgs),
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Catalog JSON document ("-" reads standard input; also via EERI_CATALOG)
    #[arg(
        long = "catalog",
        short = 'c',
        env = "EERI_CATALOG",
        value_name = "PATH",
        default_value = "-"
    )]
    catalog: PathBuf,

    /// Only numbered release builds
    #[arg(long, conflicts_with = "debug")]
    release: bool,

    /// Only debug builds
    #[arg(long)]
    debug: bool,

    /// Keep one entry per version even when build variants differ
    #[arg(long)]
    collapse_variants: bool,

    /// Do not filter bundles by the current OS and architecture
    #[arg(long)]
    all_platforms: bool,

    /// Print the selection as JSON
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn filter(&self) -> SearchFilter {
        if self.release {
            SearchFilter::Release
        } else if self.debug {
            SearchFilter::Debug
        } else {
            SearchFilter::All
        }
    }

    fn variants(&self) -> VariantPolicy {
        if self.collapse_variants {
            VariantPolicy::Collapse
        } else {
            VariantPolicy::Distinct
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => search(SearchOptions {
            catalog: args.catalog.clone(),
            filter: args.filter(),
            variants: args.variants(),
            all_platforms: args.all_platforms,
            json: args.json,
        }),
    }
}
