use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use swaggerize_core::config::DEFAULT_RESPONSE_MEDIA_TYPE;
use swaggerize_core::{
    convert, convert_file, dump_document, load_document, ConversionWarning, ConvertOptions,
    OutputFormat,
};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "swaggerize")]
#[command(about = "Convert an OpenAPI 3.0 document into a Swagger 2.0 document")]
#[command(version)]
struct Cli {
    /// Input OpenAPI 3.0 document (YAML or JSON)
    #[arg(env = "SWAGGERIZE_INPUT")]
    input: PathBuf,

    /// Output Swagger 2.0 document (defaults to stdout if not specified)
    #[arg(short, long, env = "SWAGGERIZE_OUTPUT")]
    output: Option<PathBuf>,

    /// Output format (defaults to the output file extension, YAML on stdout)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Response media type whose schema is kept
    #[arg(long, default_value = DEFAULT_RESPONSE_MEDIA_TYPE)]
    response_media_type: String,

    /// Max traversal depth
    #[arg(long, default_value_t = ConvertOptions::default().max_depth)]
    max_depth: usize,

    /// Write conversion warnings as JSON to this file
    #[arg(long)]
    warnings: Option<PathBuf>,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(val: FormatArg) -> Self {
        match val {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the document
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let options = ConvertOptions {
        response_media_type: cli.response_media_type,
        max_depth: cli.max_depth,
    };

    // convert_file picks the format from the output extension; --format overrides it.
    let warnings = match (&cli.output, cli.format) {
        (Some(output), None) => convert_file(path_str(&cli.input)?, path_str(output)?, &options)
            .map_err(|e| anyhow::Error::from(e).context("Conversion failed"))?,
        (output, format) => convert_to_writer(&cli.input, output.as_ref(), format, &options)?,
    };

    for warning in &warnings {
        eprintln!("Warning: {warning}");
    }

    if let Some(path) = cli.warnings {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create warnings file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &warnings)
            .context("Failed to write warnings")?;
        writeln!(writer).context("Failed to write trailing newline")?;
    }

    Ok(())
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .with_context(|| format!("Path is not valid UTF-8: {}", path.display()))
}

/// Convert `input` and render it to `output` (stdout if `None`).
fn convert_to_writer(
    input: &Path,
    output: Option<&PathBuf>,
    format: Option<FormatArg>,
    options: &ConvertOptions,
) -> Result<Vec<ConversionWarning>> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let document = load_document(&text)
        .with_context(|| format!("Failed to parse document from: {}", input.display()))?;

    let result = convert(document, options)
        .map_err(|e| anyhow::Error::from(e).context("Conversion failed"))?;

    let format = match (format, output) {
        (Some(format), _) => format.into(),
        (None, Some(path)) => OutputFormat::from_path(path),
        (None, None) => OutputFormat::Yaml,
    };
    let rendered = dump_document(&result.document, format).context("Failed to render document")?;
    write_output(&rendered, output)?;

    Ok(result.warnings)
}

fn write_output(rendered: &str, path: Option<&PathBuf>) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    writer
        .write_all(rendered.as_bytes())
        .context("Failed to write document")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
