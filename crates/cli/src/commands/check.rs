use anyhow::Result;

use crate::load_descriptors;

/// Validate a config description file, printing one summary line per descriptor.
pub fn check_command(file: &str, uri: Option<&str>, config: Option<&str>) -> Result<()> {
    let descriptors = load_descriptors(file, uri, config)?;
    for descriptor in &descriptors {
        println!("OK {} ({} parameters)", descriptor.uri(), descriptor.parameters().len());
    }
    println!("{file}: {} config description(s) valid", descriptors.len());
    Ok(())
}
