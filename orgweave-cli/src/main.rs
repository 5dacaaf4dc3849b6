//! Orgweave CLI - Literate Programming Tangler

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use orgweave::interface::{tangle_files, Context};
use orgweave::io::clean_build_caches;

#[derive(Parser)]
#[command(name = "orgweave")]
#[command(
    author,
    version,
    about = "Literate programming tangler for Org documents",
    long_about = "\
Extracts code blocks from Org documents into source files.\n\n\
Blocks are selected and routed by :tangle directives, noweb-style\n\
<<name>> references are expanded with indentation preserved, and each\n\
target is framed with language-appropriate comments.\n\n\
With no FILE arguments, all *.org documents under the working directory\n\
are tangled (node_modules, scripts and dist are skipped)."
)]
struct Cli {
    /// Document files to tangle
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long)]
    directory: Option<PathBuf>,

    /// Directory scanned for stale build caches after tangling
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Show what would be written without writing or cleaning
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress normal output
    #[arg(short, long)]
    quiet: bool,

    /// Skip the post-tangle cache cleanup
    #[arg(long)]
    no_clean: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Respect NO_COLOR convention (https://no-color.org/)
    let no_color = std::env::var_os("NO_COLOR").is_some();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!no_color)
        .init();

    // Determine working directory
    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Read configuration from file or use defaults
    let mut config = match cli.config {
        Some(ref path) => {
            // Explicit --config: parse failure is a hard error
            match orgweave::config::read_config_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Error reading config file {}: {}", path.display(), e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            // Auto-discovery: warn on parse failure, fall back to defaults
            match orgweave::config::read_config(&base_dir) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse config file, using defaults: {}", e);
                    orgweave::Config::default()
                }
            }
        }
    };

    // Override cleanup scope if specified on the command line
    if let Some(out_dir) = cli.out_dir {
        config.out_dir = out_dir;
    }

    let ctx = Context::new(config, base_dir);

    // Resolve input documents
    let files = if cli.files.is_empty() {
        match ctx.source_files() {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error discovering documents: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        cli.files.iter().map(|f| ctx.resolve_path(f)).collect()
    };

    if files.is_empty() {
        eprintln!("No input documents found.");
        return ExitCode::FAILURE;
    }

    tracing::info!("Tangling {} documents...", files.len());
    let transaction = tangle_files(&ctx, &files);

    if cli.dry_run {
        println!("Would write {} targets:", transaction.len());
        for description in transaction.describe() {
            println!("  {}", description);
        }
        return ExitCode::SUCCESS;
    }

    let report = transaction.execute();
    if !cli.quiet {
        println!("Tangled {} files.", report.written);
    }

    if !cli.no_clean {
        let out_dir = ctx.resolve_path(&ctx.config.out_dir);
        let removed = clean_build_caches(&out_dir, &ctx.config.clean_patterns);
        if removed > 0 {
            tracing::info!("Removed {} stale build caches.", removed);
        }
    }

    if report.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
