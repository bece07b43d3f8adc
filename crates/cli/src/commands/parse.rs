use anyhow::Result;

use crate::commands::{render_descriptors, OutputFormat};
use crate::load_descriptors;

/// Decode a config description file and print the descriptors.
pub fn parse_command(
    file: &str,
    uri: Option<&str>,
    config: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let descriptors = load_descriptors(file, uri, config)?;
    let rendered = render_descriptors(&descriptors, format)?;
    print!("{rendered}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
