//! File loading and writing utilities.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use claml_types::{ClamlDocument, CodeSystem};
use tracing::info;

use crate::parser::parse_document;
use crate::transform::transform;
use crate::types::{ClamlError, ClamlResult, TransformConfig, TransformStats};

/// Reads and parses a ClaML file.
pub fn load_document<P: AsRef<Path>>(path: P) -> ClamlResult<ClamlDocument> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ClamlError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let xml = fs::read_to_string(path)?;
    info!("Read {} ({})", path.display(), format_bytes(xml.len()));

    let document = parse_document(&xml)?;
    info!(
        "Parsed {} classes and {} modifier classes",
        document.classes.len(),
        document.modifier_classes.len()
    );

    Ok(document)
}

/// Writes a CodeSystem as pretty-printed JSON.
pub fn write_code_system<P: AsRef<Path>>(path: P, code_system: &CodeSystem) -> ClamlResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    serde_json::to_writer_pretty(&mut writer, code_system)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        "Wrote CodeSystem with {} concepts to {}",
        code_system.count,
        path.display()
    );
    Ok(())
}

/// Converts a ClaML file into a CodeSystem JSON file.
///
/// Nothing is written if the input cannot be read or parsed.
pub fn convert_file<P, Q>(input: P, output: Q, config: &TransformConfig) -> ClamlResult<TransformStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let document = load_document(input)?;
    let result = transform(&document, config);
    write_code_system(output, &result.code_system)?;
    Ok(result.stats)
}

/// Formats a byte count as a human-readable string.
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
