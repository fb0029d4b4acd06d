//! htmldeck CLI - command-line interface library
//!
//! - Convert: HTML slide document to PPTX
//! - Inspect: print the laid-out deck without writing it
//!
//! # Library Usage
//!
//! ```ignore
//! use htmldeck_cli::{convert_command, inspect_command, load_config, ConfigOverrides, OutputFormat};
//!
//! let config = load_config(&input, None, &ConfigOverrides::default())?;
//! let report = convert_command(&input, None, config.clone())?;
//! println!("{}", inspect_command(&input, OutputFormat::Json, config)?);
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert, writing slides.pptx next to the input
//! htmldeck convert slides.html --assets images/
//!
//! # Review classification and positions
//! htmldeck inspect slides.html --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{
    convert_command, default_output, format_conversion, format_plan, inspect_command,
    load_config,
};
pub use app::{run_cli, ConfigOverrides, OutputFormat};
