//! docx-context CLI - inspect the context of DOCX documents
//!
//! Prints relationships, numbering formats and core properties, and extracts
//! embedded images.

use clap::{Parser, Subcommand};
use colored::*;
use docx_context::{ContextOptions, DocxContext, DocxSession};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Relationships, numbering and metadata of DOCX documents
#[derive(Parser)]
#[command(
    name = "docx-context",
    version,
    about = "Inspect DOCX relationships, numbering and metadata",
    long_about = "docx-context - context extraction for Office Open XML word-processing documents.\n\n\
                  Reads the relationship graph, numbering definitions and core properties of a\n\
                  DOCX file, and extracts the images it references."
)]
struct Cli {
    /// Fail when numbering definitions or core properties are unreadable
    #[arg(long, global = true)]
    strict: bool,

    /// Do not attach nested relationships to their owning records
    #[arg(long, global = true)]
    flat: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document properties and numbering summary
    Info {
        /// Input file path
        input: PathBuf,
    },

    /// List every relationship with its resolved path
    Rels {
        /// Input file path
        input: PathBuf,

        /// Only relationships of this type (e.g. "image", "header")
        #[arg(short = 't', long = "type")]
        rel_type: Option<String>,
    },

    /// Extract images referenced by the document
    Images {
        /// Input file path
        input: PathBuf,

        /// Output directory for images
        #[arg(short, long, default_value = "images")]
        output: PathBuf,
    },

    /// Dump the assembled context as JSON
    Json {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ContextOptions::new()
        .with_strict_numbering(cli.strict)
        .with_strict_properties(cli.strict)
        .with_cross_link(!cli.flat);

    match cli.command {
        Commands::Info { input } => {
            let pb = create_spinner("Assembling context...");
            let session = DocxSession::open_with(&input, &options)?;
            pb.finish_and_clear();

            print_info(&input, session.context());
        }

        Commands::Rels { input, rel_type } => {
            let pb = create_spinner("Reading relationships...");
            let session = DocxSession::open_with(&input, &options)?;
            pb.finish_and_clear();

            let context = session.context();
            let records: Vec<_> = match rel_type.as_deref() {
                Some(t) => context.relationships_of_type(t).collect(),
                None => context.relationships().iter().collect(),
            };
            for record in records {
                let target = if record.is_external() {
                    format!("{} {}", record.target, "(external)".dimmed())
                } else {
                    record.path()
                };
                println!(
                    "{:<28} {:<8} {:<18} {}",
                    record.source.dimmed(),
                    record.id,
                    record.type_name().cyan(),
                    target
                );
                for nested in record.nested() {
                    println!(
                        "  {} {:<8} {:<18} {}",
                        "└".dimmed(),
                        nested.id,
                        nested.type_name().cyan(),
                        nested.path()
                    );
                }
            }
        }

        Commands::Images { input, output } => {
            let pb = create_spinner("Extracting images...");
            let session = DocxSession::open_with(&input, &options)?;
            let images = session.pull_image_files(Some(&output))?;
            pb.finish_and_clear();

            if images.is_empty() {
                println!("{} No images found in document", "!".yellow().bold());
            } else {
                println!(
                    "{} Extracted {} images to {}",
                    "✓".green().bold(),
                    images.len(),
                    output.display()
                );
                for (name, data) in &images {
                    println!("  {} ({} bytes)", name, data.len());
                }
            }
        }

        Commands::Json {
            input,
            output,
            compact,
        } => {
            let pb = create_spinner("Assembling context...");
            let session = DocxSession::open_with(&input, &options)?;
            let summary = session.context().summary();
            let json = if compact {
                serde_json::to_string(&summary)?
            } else {
                serde_json::to_string_pretty(&summary)?
            };
            pb.finish_and_clear();

            write_output(output.as_ref(), &json)?;
            if let Some(path) = output {
                println!("{} Wrote context: {}", "✓".green().bold(), path.display());
            }
        }
    }

    Ok(())
}

fn print_info(input: &std::path::Path, context: &DocxContext) {
    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40));
    println!(
        "{}: {}",
        "File".bold(),
        input.file_name().unwrap_or_default().to_string_lossy()
    );
    if let Some(main) = context.main_document() {
        println!("{}: {}", "Main part".bold(), main.path());
    }
    println!("{}: {}", "Relationships".bold(), context.relationships().len());
    println!(
        "{}: {}",
        "Images".bold(),
        context
            .relationships_of_type("image")
            .filter(|r| !r.is_external())
            .count()
    );

    println!("\n{}", "Properties".cyan().bold());
    println!("{}", "─".repeat(40));
    match context.properties() {
        Ok(properties) if properties.is_empty() => println!("{}", "(none)".dimmed()),
        Ok(properties) => {
            for (name, value) in properties.iter() {
                println!("{}: {}", name.bold(), value);
            }
        }
        Err(e) => println!("{} {}", "!".yellow().bold(), e),
    }

    println!("\n{}", "Numbering".cyan().bold());
    println!("{}", "─".repeat(40));
    match context.numbering_index() {
        Ok(index) => {
            let mut ids: Vec<&str> = index.num_ids().collect();
            ids.sort_by_key(|id| (id.len(), *id));
            for id in ids {
                let formats = index.formats(id).unwrap_or_default();
                println!("{} {}: {}", "numId".bold(), id, formats.join(", "));
            }
        }
        Err(e) if e.is_feature_absent() => println!("{}", "(no lists)".dimmed()),
        Err(e) => println!("{} {}", "!".yellow().bold(), e),
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["docx-context", "rels", "a.docx", "--strict", "-t", "image"]).unwrap();
        assert!(cli.strict);
        assert!(!cli.flat);
        assert!(matches!(cli.command, Commands::Rels { rel_type: Some(ref t), .. } if t == "image"));
    }
}
