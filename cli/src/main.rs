//! relayout CLI - reconstructs structured documents from extracted content

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use relayout::{AnalyzeOptions, DocumentModel, ExtractedDocument};

#[derive(Parser)]
#[command(name = "relayout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild document structure from extracted page content", long_about = None)]
struct Cli {
    /// Input extraction JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze extracted content and emit the document model as JSON
    Analyze {
        /// Input extraction JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Disable table detection
        #[arg(long)]
        no_tables: bool,

        /// Disable image extraction
        #[arg(long)]
        no_images: bool,

        /// Table confidence threshold (0.0-1.0)
        #[arg(long, default_value = "0.6")]
        table_confidence: f32,

        /// Disable parallel page analysis
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show a summary of the analyzed document
    Info {
        /// Input extraction JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Analyze {
            input,
            output,
            no_tables,
            no_images,
            table_confidence,
            sequential,
            compact,
        }) => cmd_analyze(
            &input,
            output.as_deref(),
            no_tables,
            no_images,
            table_confidence,
            sequential,
            compact,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze if input is provided
            if let Some(input) = cli.input {
                cmd_analyze(&input, cli.output.as_deref(), false, false, 0.6, false, false)
            } else {
                println!("{}", "Usage: relayout <FILE> [OUTPUT]".yellow());
                println!("       relayout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_extracted(input: &Path) -> Result<ExtractedDocument, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let extracted = serde_json::from_str(&json)?;
    Ok(extracted)
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    no_tables: bool,
    no_images: bool,
    table_confidence: f32,
    sequential: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let extracted = read_extracted(input)?;

    let mut options = AnalyzeOptions::new()
        .with_tables(!no_tables)
        .with_images(!no_images)
        .with_table_confidence(table_confidence);
    if sequential {
        options = options.sequential();
    }

    let document = relayout::analyze_with_options(&extracted, &options)?;

    for warning in &document.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }

    let json = if compact {
        serde_json::to_string(&document)?
    } else {
        serde_json::to_string_pretty(&document)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let extracted = read_extracted(input)?;
    let document: DocumentModel = relayout::analyze(&extracted)?;

    println!("{}", "Document".green().bold());
    if let Some(title) = &document.metadata.title {
        println!("  Title:      {}", title);
    }
    if let Some(author) = &document.metadata.author {
        println!("  Author:     {}", author);
    }
    println!("  Pages:      {}", document.pages.len());
    println!("  Size:       {:?} {:?}", document.settings.page_size, document.settings.orientation);
    println!();
    println!("{}", "Content".green().bold());
    println!("  Characters: {}", document.content.char_len());
    println!("  Paragraphs: {}", document.content.paragraphs.len());
    println!("  Objects:    {}", document.content.objects.len());
    for warning in &document.warnings {
        println!("  {} {}", "Warning:".yellow(), warning);
    }

    Ok(())
}

fn cmd_version() {
    println!("relayout {}", env!("CARGO_PKG_VERSION"));
}
