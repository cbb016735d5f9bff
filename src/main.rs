use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};

use linkspan::input::read_text;
use linkspan::{EntityType, ExtractorConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One tab separated line per element
    Tsv,
    /// Rewritten text and elements as a JSON document
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "linkspan")]
#[command(about = "Extract mentions, hashtags, URLs and custom entities from text")]
#[command(version)]
struct Args {
    /// Input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Comma separated entity types (mention, hashtag, url, custom:<id>)
    #[arg(long, value_delimiter = ',')]
    types: Option<Vec<String>>,

    /// Longest URL display text in user-perceived characters
    #[arg(long)]
    max_url_length: Option<usize>,

    /// Marker appended to shortened URLs, counted inside the limit
    #[arg(long)]
    ellipsis: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "tsv")]
    format: OutputFormat,

    /// Log extraction details to stderr
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    let mut config = match &args.config {
        Some(path) => ExtractorConfig::load_async(path).await?,
        None => ExtractorConfig::default(),
    };
    if let Some(types) = &args.types {
        let parsed = types
            .iter()
            .map(|name| name.parse::<EntityType>())
            .collect::<Result<Vec<_>>>()?;
        config.enabled = Some(parsed);
    }
    if args.max_url_length.is_some() {
        config.url_max_length = args.max_url_length;
    }
    if args.ellipsis.is_some() {
        config.url_ellipsis = args.ellipsis.clone();
    }

    let extractor = config.build()?;
    let text = read_text(args.input.as_deref()).await?;
    info!("Read {} bytes of input", text.len());

    let extraction = extractor.extract(&text);
    match args.format {
        OutputFormat::Tsv => {
            for (index, element) in extraction.elements.iter().enumerate() {
                println!("{}", element.format_tsv(index));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&extraction)?);
        }
    }

    info!("Emitted {} elements", extraction.elements.len());
    Ok(())
}
