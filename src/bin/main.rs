//! Gallery CLI - browse the image table from a terminal
//!
//! Usage:
//!   gallery check [--env]
//!   gallery labels
//!   gallery details [--label <label>]
//!   gallery range
//!   gallery count [filters]
//!   gallery list [filters] [--page <n>] [--per-page <n>] [--all]
//!   gallery show <path> [--thumbnail] [--out <file>]
//!   gallery normalize <path>
//!
//! Examples:
//!   gallery list --label animal --min-score 0.8 --page 2
//!   gallery show dbfs:/Volumes/demos/image_app/images/cat.png --thumbnail --out cat.png

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use gallery::config::{env_snapshot, validate_required_env, Settings};
use gallery::gallery::{display_path, file_name, ImageFilter};
use gallery::volume::normalize_volume_path;
use gallery::{Gallery, GalleryError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Gallery - browse AI-labeled images stored in workspace volumes")]
#[command(version)]
struct Cli {
    /// Settings file (defaults: $GALLERY_CONFIG, ./gallery.toml, user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the environment and locate the image table
    Check {
        /// Also print the gallery-related environment, secrets masked
        #[arg(long)]
        env: bool,
    },

    /// List distinct labels
    Labels,

    /// List distinct label details
    Details {
        /// Only details seen together with this label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Show the lowest and highest score
    Range,

    /// Count matching images
    Count {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List matching image paths
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u64,

        /// Images per page (defaults to the configured page size)
        #[arg(long)]
        per_page: Option<u64>,

        /// List every match instead of one page
        #[arg(long, conflicts_with_all = ["page", "per_page"])]
        all: bool,
    },

    /// Download and decode an image
    Show {
        /// Stored path, volume path, or bare file name
        path: String,

        /// Scale down to the configured thumbnail size
        #[arg(short, long)]
        thumbnail: bool,

        /// Write the decoded image to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the volume path a stored path resolves to
    Normalize {
        path: String,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive substring of the path
    #[arg(short, long)]
    search: Option<String>,

    #[arg(short, long)]
    label: Option<String>,

    #[arg(short = 'd', long)]
    label_detail: Option<String>,

    /// Inclusive lower score bound
    #[arg(long)]
    min_score: Option<f64>,

    /// Inclusive upper score bound
    #[arg(long)]
    max_score: Option<f64>,
}

impl From<FilterArgs> for ImageFilter {
    fn from(args: FilterArgs) -> Self {
        ImageFilter {
            search: args.search,
            label: args.label,
            label_detail: args.label_detail,
            min_score: args.min_score,
            max_score: args.max_score,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match load_settings(cli.config) {
        Ok(s) => s,
        Err(e) => return report(&e),
    };

    if let Commands::Normalize { path } = &cli.command {
        return cmd_normalize(path, &settings);
    }
    if let Commands::Check { env } = &cli.command {
        if *env {
            for (name, value) in env_snapshot() {
                println!("{}={}", name, value);
            }
        }
        let missing = validate_required_env();
        if !missing.is_empty() {
            eprintln!("Missing required environment variables:");
            for name in &missing {
                eprintln!("  - {}", name);
            }
            return ExitCode::FAILURE;
        }
    }

    let gallery = match Gallery::from_env(settings) {
        Ok(g) => g,
        Err(e) => return report(&e),
    };

    let code = match cli.command {
        Commands::Check { .. } => cmd_check(&gallery).await,
        Commands::Labels => print_lines(gallery.labels().await),
        Commands::Details { label } => print_lines(gallery.label_details(label.as_deref()).await),
        Commands::Range => cmd_range(&gallery).await,
        Commands::Count { filter } => match gallery.count(&filter.into()).await {
            Ok(n) => {
                println!("{}", n);
                ExitCode::SUCCESS
            }
            Err(e) => report(&e),
        },
        Commands::List {
            filter,
            page,
            per_page,
            all,
        } => cmd_list(&gallery, filter.into(), page, per_page, all).await,
        Commands::Show {
            path,
            thumbnail,
            out,
        } => cmd_show(&gallery, &path, thumbnail, out).await,
        Commands::Normalize { .. } => ExitCode::SUCCESS,
    };

    gallery.shutdown().await;
    code
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings, GalleryError> {
    let settings = match path {
        Some(p) => Settings::from_file(p)?,
        None => Settings::load()?,
    };
    Ok(settings)
}

fn report(error: &GalleryError) -> ExitCode {
    eprintln!("Error ({}): {}", error.kind(), error);
    if error.is_retriable() {
        eprintln!("This may be temporary; try again.");
    }
    ExitCode::FAILURE
}

fn print_lines(result: Result<Vec<String>, GalleryError>) -> ExitCode {
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

/// Stored paths, one per line, in query order.
///
/// Printed unchanged so they sort the way the database ordered them and
/// can be passed straight to `show`.
fn write_paths<W: Write>(out: &mut W, paths: &[String]) -> io::Result<()> {
    for path in paths {
        writeln!(out, "{}", path)?;
    }
    Ok(())
}

fn print_paths(paths: &[String]) -> bool {
    match write_paths(&mut io::stdout().lock(), paths) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            false
        }
    }
}

fn cmd_normalize(path: &str, settings: &Settings) -> ExitCode {
    match normalize_volume_path(path, &settings.volume.base_path) {
        Ok(normalized) => {
            println!("{}", normalized);
            ExitCode::SUCCESS
        }
        Err(e) => report(&GalleryError::from(e)),
    }
}

async fn cmd_check(gallery: &Gallery) -> ExitCode {
    println!("Database: {}", gallery.connection().describe());
    match gallery.check_setup().await {
        Ok(schema) => {
            println!(
                "Table:    {}.{}",
                schema,
                gallery.settings().table.name
            );
            println!("Volume:   {}", gallery.settings().volume.base_path);
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

async fn cmd_range(gallery: &Gallery) -> ExitCode {
    match gallery.score_range().await {
        Ok((min, max)) => {
            println!("{} {}", min, max);
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

async fn cmd_list(
    gallery: &Gallery,
    filter: ImageFilter,
    page: u64,
    per_page: Option<u64>,
    all: bool,
) -> ExitCode {
    if all {
        return match gallery.all_paths(&filter).await {
            Ok(paths) if print_paths(&paths) => ExitCode::SUCCESS,
            Ok(_) => ExitCode::FAILURE,
            Err(e) => report(&e),
        };
    }

    let per_page =
        per_page.unwrap_or_else(|| u64::from(gallery.settings().display.items_per_page));
    match gallery.page(&filter, page, per_page).await {
        Ok(result) => {
            if !print_paths(&result.paths) {
                return ExitCode::FAILURE;
            }
            let p = result.pagination;
            match p.row_span() {
                Some((first, last)) => eprintln!(
                    "Showing {}-{} of {} (page {}/{})",
                    first,
                    last,
                    p.total(),
                    p.page(),
                    p.total_pages()
                ),
                None => eprintln!("No images match the current filters."),
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

async fn cmd_show(gallery: &Gallery, path: &str, thumbnail: bool, out: Option<PathBuf>) -> ExitCode {
    let result = if thumbnail {
        gallery.load_thumbnail(path).await
    } else {
        gallery.load_image(path).await
    };

    let image = match result {
        Ok(image) => image,
        Err(e) => return report(&e),
    };

    println!(
        "{} ({}): {}x{} {:?}",
        file_name(path),
        display_path(path),
        image.width(),
        image.height(),
        image.color()
    );

    if let Some(out) = out {
        if let Err(e) = image.save(&out) {
            eprintln!("Error writing '{}': {}", out.display(), e);
            return ExitCode::FAILURE;
        }
        println!("Written to {}", out.display());
    }

    ExitCode::SUCCESS
}
