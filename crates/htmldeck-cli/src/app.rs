//! CLI application logic
//!
//! Argument parsing, configuration loading and the two subcommands.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use htmldeck_core::{ConversionReport, Converter, DeckConfig, DeckPlan, Diagnostic, SlideRecord};
use htmldeck_pptx::{PositionedElement, TextStyle};

/// Output format for `inspect`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tools and diffing
    Json,
}

#[derive(Parser)]
#[command(name = "htmldeck")]
#[command(author, version, about = "HTML slides in, PowerPoint out", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HTML slide document to PPTX
    Convert {
        /// Input HTML file
        input: PathBuf,

        /// Output PPTX file (defaults to the input with a .pptx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory image references are resolved against
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Presentation title stored in the document properties
        #[arg(long)]
        title: Option<String>,

        /// Author stored in the document properties
        #[arg(long)]
        author: Option<String>,
    },

    /// Lay out a document and print the slides without writing anything
    Inspect {
        /// Input HTML file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Directory image references are resolved against
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub assets: Option<PathBuf>,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Run the CLI application
///
/// Parses arguments, installs the log subscriber and dispatches to the
/// matching command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Convert {
            input,
            output,
            assets,
            config,
            title,
            author,
        } => {
            let overrides = ConfigOverrides {
                assets,
                title,
                author,
            };
            let config = load_config(&input, config.as_deref(), &overrides)?;
            let report = convert_command(&input, output.as_deref(), config)?;
            print!("{}", format_conversion(&report));
        }
        Commands::Inspect {
            input,
            format,
            assets,
            config,
        } => {
            let overrides = ConfigOverrides {
                assets,
                ..ConfigOverrides::default()
            };
            let config = load_config(&input, config.as_deref(), &overrides)?;
            println!("{}", inspect_command(&input, format, config)?);
        }
    }

    Ok(())
}

/// Log to stderr at INFO, DEBUG with `--verbose`, WARN with `--quiet`.
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Build the configuration for converting `input`.
///
/// Starts from the configuration file, if any, then applies `overrides`.
/// A relative asset root that did not come from the command line is taken
/// relative to the input document's directory.
pub fn load_config(
    input: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<DeckConfig> {
    let mut config = match config_path {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            DeckConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration: {}", path.display()))?
        }
        None => DeckConfig::default(),
    };

    match &overrides.assets {
        Some(assets) => config.assets.root = assets.clone(),
        None if config.assets.root.is_relative() => {
            if let Some(dir) = input.parent() {
                config.assets.root = dir.join(&config.assets.root);
            }
        }
        None => {}
    }
    if let Some(title) = &overrides.title {
        config.meta.title = Some(title.clone());
    }
    if let Some(author) = &overrides.author {
        config.meta.author = Some(author.clone());
    }

    debug!(assets = %config.assets.root.display(), "Loaded configuration");
    Ok(config)
}

/// Output path used when none is given: the input with a `.pptx` extension.
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("pptx")
}

/// Convert `input` to a PPTX container.
pub fn convert_command(
    input: &Path,
    output: Option<&Path>,
    config: DeckConfig,
) -> Result<ConversionReport> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let output = output.map_or_else(|| default_output(input), Path::to_path_buf);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    Converter::new(config)
        .convert_file(input, &output)
        .with_context(|| format!("Failed to convert {}", input.display()))
}

/// Lay out `input` and render the result in `format`.
pub fn inspect_command(input: &Path, format: OutputFormat, config: DeckConfig) -> Result<String> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let plan = Converter::new(config)
        .plan_file(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&Inspection::new(&plan))
            .context("Failed to serialize the deck to JSON"),
        OutputFormat::Text => Ok(format_plan(&plan)),
    }
}

/// JSON shape of `inspect` output
#[derive(Serialize)]
struct Inspection<'a> {
    slides: Vec<InspectedSlide<'a>>,
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct InspectedSlide<'a> {
    #[serde(flatten)]
    record: &'a SlideRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<String>,
    positioned: &'a [PositionedElement],
}

impl<'a> Inspection<'a> {
    fn new(plan: &'a DeckPlan) -> Self {
        let slides = plan
            .report
            .slides
            .iter()
            .zip(plan.deck.iter())
            .map(|(record, slide)| InspectedSlide {
                record,
                background: slide.background.map(|c| c.to_string()),
                positioned: &slide.elements,
            })
            .collect();
        Self {
            slides,
            diagnostics: &plan.report.diagnostics,
        }
    }
}

fn describe_style(style: &TextStyle) -> String {
    let mut out = format!("{}pt", style.font_size_pt);
    if style.bold {
        out.push_str(" bold");
    }
    if let Some(color) = style.color {
        let _ = write!(out, " {}", color);
    }
    let _ = write!(out, " {}", style.alignment.as_ooxml());
    out
}

fn describe_element(element: &PositionedElement) -> String {
    let b = element.bbox();
    let at = format!(
        "{:5.2},{:5.2} {:5.2}x{:<5.2}",
        b.left, b.top, b.width, b.height
    );
    match element {
        PositionedElement::Text { text, style, .. } => {
            format!("text  {}  {}  {:?}", at, describe_style(style), text)
        }
        PositionedElement::Image { path, .. } => {
            format!("image {}  {}", at, path.display())
        }
        PositionedElement::Shape { fill, .. } => format!("shape {}  {}", at, fill),
    }
}

/// Text rendering of a laid-out deck: every slide with its elements,
/// then the diagnostics.
pub fn format_plan(plan: &DeckPlan) -> String {
    let mut out = String::new();
    for (record, slide) in plan.report.slides.iter().zip(plan.deck.iter()) {
        let _ = writeln!(
            out,
            "Slide {} [{}] {}",
            record.index,
            record.template,
            if record.title.is_empty() {
                "(untitled)"
            } else {
                record.title.as_str()
            }
        );
        if let Some(background) = slide.background {
            let _ = writeln!(out, "  background {}", background);
        }
        for element in &slide.elements {
            let _ = writeln!(out, "  {}", describe_element(element));
        }
    }

    for diag in &plan.report.diagnostics {
        let _ = writeln!(out, "{}", diag);
    }
    let _ = write!(
        out,
        "{} slide(s), {} warning(s)",
        plan.report.slide_count,
        plan.report.warning_count()
    );
    out
}

/// Summary printed after `convert`.
pub fn format_conversion(report: &ConversionReport) -> String {
    let mut out = String::new();
    for diag in &report.diagnostics {
        let _ = writeln!(out, "{}", diag);
    }
    let _ = writeln!(
        out,
        "✓ Wrote {} slide(s) to {} ({} of {} image(s) placed, {} warning(s))",
        report.slide_count,
        report
            .output
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
        report.images_placed,
        report.image_references,
        report.warning_count()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::try_parse_from([
            "htmldeck", "convert", "deck.html", "-o", "out.pptx", "--title", "Results",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert {
                input,
                output,
                title,
                assets,
                ..
            } => {
                assert_eq!(input, PathBuf::from("deck.html"));
                assert_eq!(output, Some(PathBuf::from("out.pptx")));
                assert_eq!(title.as_deref(), Some("Results"));
                assert!(assets.is_none());
            }
            Commands::Inspect { .. } => panic!("expected convert"),
        }
    }

    #[test]
    fn test_cli_parses_inspect_json() {
        let cli =
            Cli::try_parse_from(["htmldeck", "-q", "inspect", "deck.html", "--format", "json"])
                .unwrap();
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Inspect {
                format: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["htmldeck", "-v", "-q", "inspect", "x.html"]).is_err());
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("talks/final.html")),
            PathBuf::from("talks/final.pptx")
        );
    }

    #[test]
    fn test_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("deck.toml");
        fs::write(
            &config_path,
            "[meta]\ntitle = \"From file\"\nauthor = \"File Author\"\n[assets]\nroot = \"pictures\"\n",
        )
        .unwrap();
        let input = dir.path().join("deck.html");

        let config = load_config(&input, Some(&config_path), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.meta.title.as_deref(), Some("From file"));
        assert_eq!(config.assets.root, dir.path().join("pictures"));

        let overrides = ConfigOverrides {
            assets: Some(PathBuf::from("elsewhere")),
            title: Some("From flag".to_string()),
            author: None,
        };
        let config = load_config(&input, Some(&config_path), &overrides).unwrap();
        assert_eq!(config.meta.title.as_deref(), Some("From flag"));
        assert_eq!(config.meta.author.as_deref(), Some("File Author"));
        assert_eq!(config.assets.root, PathBuf::from("elsewhere"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(
            Path::new("deck.html"),
            Some(Path::new("/definitely/not/here.toml")),
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Configuration file not found"));
    }

    #[test]
    fn test_format_plan_lists_elements() {
        let plan = Converter::default()
            .plan_str(r##"<section data-background-color="#abc"><h2>Methods</h2><p>Two models.</p></section>"##);
        let text = format_plan(&plan);
        assert!(text.starts_with("Slide 1 [generic] Methods\n"));
        assert!(text.contains("  background #aabbcc"));
        assert!(text.contains("\"Two models.\""));
        assert!(text.ends_with("1 slide(s), 0 warning(s)"));
    }
}
