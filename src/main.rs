use anyhow::Context;
use chrono::Local;
use clap::{Args as ClapArgs, Parser, Subcommand};
use rosterview::data::loader::EmbeddingColumns;
use rosterview::report::{self, Summary};
use rosterview::{data, PrepareOptions, PreparedData};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rosterview")]
#[command(author, version, about = "Interactive chart of NBA roster height distributions")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    input: InputArgs,

    /// Directory for generated report files
    #[arg(short, long, default_value = "rosterview-output")]
    out_dir: PathBuf,

    /// Don't prompt to open the report
    #[arg(long)]
    no_open: bool,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ClapArgs, Debug, Clone)]
struct InputArgs {
    /// Embedding table (CSV with a header row)
    #[arg(long, global = true, default_value = "data/height_histograms_le_df.csv")]
    embedding: PathBuf,

    /// Raw histograms (JSON object: roster id -> counts)
    #[arg(long, global = true, default_value = "data/team_height_histograms.json")]
    histograms: PathBuf,

    /// Roster id column in the embedding table
    #[arg(long, global = true, default_value = "Roster")]
    id_column: String,

    /// First embedding coordinate column
    #[arg(long, global = true, default_value = "LE_Component_1")]
    x_column: String,

    /// Second embedding coordinate column
    #[arg(long, global = true, default_value = "LE_Component_2")]
    y_column: String,

    /// Lowest height covered by the raw histograms (inches)
    #[arg(long, global = true, default_value = "66")]
    height_min: f64,

    /// Highest height covered by the raw histograms (inches)
    #[arg(long, global = true, default_value = "90")]
    height_max: f64,
}

impl From<InputArgs> for PrepareOptions {
    fn from(args: InputArgs) -> Self {
        PrepareOptions {
            embedding_path: args.embedding,
            histograms_path: args.histograms,
            columns: EmbeddingColumns { id: args.id_column, x: args.x_column, y: args.y_column },
            original_min: args.height_min,
            original_max: args.height_max,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the chart locally, with search/hover handled by the server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Don't open the browser
        #[arg(long)]
        no_browser: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("\x1b[31mError:\x1b[0m {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let options = PrepareOptions::from(args.input.clone());
    let prepared = data::prepare(&options).context("failed to prepare chart data")?;

    match &args.command {
        Some(Command::Serve { port, no_browser }) => {
            rosterview::serve::start(*port, &prepared, !*no_browser).context("server error")?;
            Ok(())
        }
        None => generate(&args, &prepared),
    }
}

fn generate(args: &Args, prepared: &PreparedData) -> anyhow::Result<()> {
    let summary = Summary::from_data(prepared);

    if !args.quiet {
        eprintln!("\x1b[1mrosterview - NBA Roster Heights\x1b[0m");
        eprintln!("{}", "─".repeat(70));
    }

    eprintln!("  Rosters:     {}", summary.rosters);
    eprintln!("  Histograms:  {}", summary.histograms);
    if let (Some(first), Some(last)) = (summary.first_season, summary.last_season) {
        eprintln!("  Seasons:     {}-{}", first, last);
    }
    if summary.missing_histograms > 0 {
        eprintln!("  \x1b[33mMissing histograms:\x1b[0m {}", summary.missing_histograms);
    }

    let generated = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let files = report::generate(&args.out_dir, prepared, &generated)
        .with_context(|| format!("failed to write report to {}", args.out_dir.display()))?;

    if !args.quiet {
        eprintln!("\n\x1b[32mReport saved:\x1b[0m");
        eprintln!("  1. {} - chart only", files.standalone.display());
        eprintln!("  2. {} - complete interactive page", files.page.display());
        eprintln!("  3. {} and {} - fragments for embedding", files.script.display(), files.div.display());
    }

    if !args.no_open && !args.quiet {
        eprint!("\nOpen report in browser? [Y/n] ");
        io::stderr().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_ok() {
            let input = input.trim().to_lowercase();
            if input.is_empty() || input == "y" || input == "yes" {
                if let Err(e) = open::that(&files.page) {
                    eprintln!("Failed to open report: {}", e);
                }
            }
        }
    }

    Ok(())
}
