use std::fmt::Write as _;

use anyhow::Result;
use confdesc_core::{ConfigDescriptor, ParameterDescriptor};

/// Output format for decoded descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Map the mutually exclusive `--json` / `--yaml` flags to a format.
    pub fn from_flags(json: bool, yaml: bool) -> Self {
        match (json, yaml) {
            (true, _) => OutputFormat::Json,
            (false, true) => OutputFormat::Yaml,
            (false, false) => OutputFormat::Text,
        }
    }
}

/// Render descriptors in the requested format.
pub fn render_descriptors(descriptors: &[ConfigDescriptor], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(descriptors)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(descriptors)?),
        OutputFormat::Text => Ok(render_text(descriptors)),
    }
}

fn render_text(descriptors: &[ConfigDescriptor]) -> String {
    let mut out = String::new();
    if descriptors.is_empty() {
        out.push_str("Config descriptions:\n(none)\n");
        return out;
    }

    for descriptor in descriptors {
        let _ = writeln!(out, "Config description: {}", descriptor.uri());
        let _ = writeln!(out, "  Parameters ({}):", descriptor.parameters().len());
        for parameter in descriptor.parameters() {
            let _ = writeln!(out, "  - {}", describe_parameter(parameter));
        }
    }
    out
}

fn describe_parameter(p: &ParameterDescriptor) -> String {
    let mut flags = vec![p.kind.to_string()];
    if p.required {
        flags.push("required".into());
    }
    if p.read_only {
        flags.push("read-only".into());
    }
    if p.multiple {
        flags.push("multiple".into());
    }
    if let Some(default) = &p.default {
        flags.push(format!("default={default}"));
    }

    let mut line = format!("{} ({})", p.name, flags.join(", "));
    if let Some(label) = &p.label {
        line.push_str(&format!(" - {label}"));
    }
    line
}
