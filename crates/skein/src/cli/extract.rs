//! `skein extract` command implementation.

use std::path::Path;

use skein::{Extractor, SkeinConfig};

use super::display::print_relationships;

/// Output format for `skein extract`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Serialized relationship set
    Json,
    /// Colored per-category listing
    Summary,
}

/// Run the extract command.
pub fn run(
    file: &Path,
    format: Format,
    pretty: bool,
    config: SkeinConfig,
) -> Result<(), skein::Error> {
    let mut extractor = Extractor::with_config(config);
    let pretty = pretty || extractor.config().output.pretty;

    let file_name = extractor.parse(file)?.file_name().to_string();
    let relationships = extractor.extract_relationships();

    match format {
        Format::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(&relationships)?
            } else {
                serde_json::to_string(&relationships)?
            };
            println!("{json}");
        }
        Format::Summary => print_relationships(&file_name, &relationships),
    }

    Ok(())
}
