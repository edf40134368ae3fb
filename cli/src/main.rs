//! docstrata CLI - flatten document trees into symbols and annotation layers

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use docstrata::{
    export_document_with_options, extract_layer_with_options, to_json, Document, ExtractOptions,
    JsonFormat, Layer,
};

#[derive(Parser)]
#[command(name = "docstrata")]
#[command(version)]
#[command(about = "Flatten document trees into symbols and annotation layers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce the unified export: symbol buffer plus all layers
    Export {
        /// Input document tree JSON (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,

        /// Author candidate line length cutoff, in characters
        #[arg(long, value_name = "N")]
        author_limit: Option<usize>,

        /// Vertical gap below which adjacent code blocks merge
        #[arg(long, value_name = "UNITS")]
        code_gap: Option<f32>,
    },

    /// Extract a single layer as `{text, boxes}` entities
    Layer {
        /// Layer name (e.g. paragraphs, sentences, tables)
        #[arg(value_name = "LAYER")]
        layer: String,

        /// Input document tree JSON (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// Show document statistics
    Info {
        /// Input document tree JSON (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export {
            input,
            output,
            compact,
            author_limit,
            code_gap,
        } => cmd_export(
            input.as_deref(),
            output.as_deref(),
            compact,
            author_limit,
            code_gap,
        ),
        Commands::Layer {
            layer,
            input,
            output,
            compact,
        } => cmd_layer(&layer, input.as_deref(), output.as_deref(), compact),
        Commands::Info { input } => cmd_info(input.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_document(input: Option<&Path>) -> docstrata::Result<Document> {
    let json = match input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Document::from_json(&json)
}

fn write_output(output: Option<&Path>, content: &str) -> docstrata::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn build_options(author_limit: Option<usize>, code_gap: Option<f32>) -> ExtractOptions {
    let mut options = ExtractOptions::new();
    if let Some(limit) = author_limit {
        options = options.with_author_text_limit(limit);
    }
    if let Some(gap) = code_gap {
        options = options.with_code_gap_threshold(gap);
    }
    options
}

fn cmd_export(
    input: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
    author_limit: Option<usize>,
    code_gap: Option<f32>,
) -> docstrata::Result<()> {
    let doc = load_document(input)?;
    let options = build_options(author_limit, code_gap);
    let export = export_document_with_options(&doc, &options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    write_output(output, &to_json(&export, format)?)
}

fn cmd_layer(
    layer: &str,
    input: Option<&Path>,
    output: Option<&Path>,
    compact: bool,
) -> docstrata::Result<()> {
    let layer: Layer = layer.parse()?;
    let doc = load_document(input)?;
    let entities = extract_layer_with_options(&doc, layer, &ExtractOptions::default());

    let body = serde_json::json!({ "entities": entities });
    let rendered = if compact {
        serde_json::to_string(&body)
    } else {
        serde_json::to_string_pretty(&body)
    }
    .map_err(|e| docstrata::Error::Render(e.to_string()))?;
    write_output(output, &rendered)
}

fn cmd_info(input: Option<&Path>) -> docstrata::Result<()> {
    let doc = load_document(input)?;
    let export = export_document_with_options(&doc, &ExtractOptions::default())?;

    println!("{}", "Document".green().bold());
    println!("  Nodes:    {}", doc.node_count());
    println!("  Pages:    {}", doc.page_count());
    println!("  Symbols:  {} bytes", export.symbols.len());
    println!("  Entities: {}", export.entities.total_entities());

    println!("\n{}", "Layers".green().bold());
    for layer in Layer::ALL {
        let count = export.entities.get(layer).len();
        if count > 0 {
            println!("  {:<12} {}", layer.to_string(), count);
        }
    }
    Ok(())
}
