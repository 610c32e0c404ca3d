use clap::{Args as ClapArgs, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

use visual_gallery::baseline::{PromotionReport, Selection, promote_and_render, promotion_json};
use visual_gallery::config::{self, Config, Layout};
use visual_gallery::report::{self, GallerySummary};
use visual_gallery::logging;

/// Visual Gallery - compare baseline and most recent renders
#[derive(Parser, Debug)]
#[command(
    name = "gallery",
    about = "Visual regression gallery: compare baseline and most recent renders",
    after_help = "ENVIRONMENT VARIABLES:\n\
        GALLERY_BASELINE_DIR   Baseline directory\n\
        GALLERY_RECENT_DIR     Most recent results directory\n\
        GALLERY_OUTPUT_DIR     Gallery output directory (must exist)\n\
        GALLERY_STYLESHEET     Stylesheet to copy instead of the built-in one\n\
        GALLERY_TITLE          Page title prefix\n\
        RUST_LOG               Log filter (default: warn)"
)]
struct Args {
    #[command(flatten)]
    dirs: DirArgs,

    /// Log copies and written pages
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(ClapArgs, Debug)]
struct DirArgs {
    /// Directory holding <index>.png and <index>.txt
    #[arg(long, global = true, env = config::ENV_BASELINE_DIR, default_value = config::DEFAULT_BASELINE_DIR)]
    baseline_dir: PathBuf,

    /// Directory holding <index>-<version>.png and .txt
    #[arg(long, global = true, env = config::ENV_RECENT_DIR, default_value = config::DEFAULT_RECENT_DIR)]
    recent_dir: PathBuf,

    /// Directory the HTML pages are written to
    #[arg(long, global = true, env = config::ENV_OUTPUT_DIR, default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Stylesheet copied next to the pages
    #[arg(long, global = true, env = config::ENV_STYLESHEET)]
    stylesheet: Option<PathBuf>,

    /// Page title prefix
    #[arg(long, global = true, env = config::ENV_TITLE, default_value = config::DEFAULT_TITLE)]
    title: String,
}

impl DirArgs {
    fn into_config(self) -> Config {
        let config = Config::defaults()
            .layout(Layout::new(self.baseline_dir, self.recent_dir, self.output_dir))
            .title(self.title);
        match self.stylesheet {
            Some(path) => config.stylesheet(path),
            None => config,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare baseline and most recent results and render the gallery
    Render {
        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Promote most recent results to baseline, then re-render the gallery
    Baseline {
        /// "all", or the test indices to promote
        targets: Vec<String>,

        /// Output the promotion and gallery summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init(args.verbose);
    let config = args.dirs.into_config();

    match args.command {
        Some(Commands::Render { json }) => {
            let summary = report::generate(&config)?;
            if json {
                println!("{}", summary.to_json()?);
            } else {
                print_summary(&summary);
            }
        }

        Some(Commands::Baseline { targets, json }) => {
            let Some(selection) = Selection::from_args(targets.as_slice())? else {
                if json {
                    println!("{}", promotion_json(&PromotionReport::default(), None)?);
                } else {
                    println!("nothing to do");
                }
                return Ok(());
            };

            if !json {
                match selection {
                    Selection::All => println!("baselining all"),
                    Selection::Indices(_) => println!("baselining some"),
                }
            }

            let (promotion, summary) = promote_and_render(&config, &selection)?;

            if json {
                println!("{}", promotion_json(&promotion, Some(&summary))?);
            } else {
                for line in promotion.lines() {
                    println!("{}", line);
                }
                println!("updated gallery");
                print_summary(&summary);
            }
        }

        None => {
            println!("Visual Gallery - visual regression reports");
            println!();
            println!("Usage: gallery <COMMAND>");
            println!();
            println!("Commands:");
            println!("  render    Compare results and render the gallery");
            println!("  baseline  Promote most recent results to baseline");
            println!();
            println!("Run with --help for more information.");
        }
    }

    Ok(())
}

fn print_summary(summary: &GallerySummary) {
    println!(
        "Gallery: {} tests, {} passed, {} failed",
        summary.total, summary.passed, summary.failed
    );
    println!("  All:    {}", summary.all_page.display());
    println!("  Failed: {}", summary.failed_page.display());
}
