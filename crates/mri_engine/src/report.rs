use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use mri_core::{CandidateFile, ClassificationResult, ResultView, MEDICAL_DISCLAIMER};
use sha2::{Digest, Sha256};

use crate::persist::{AtomicFileWriter, PersistError};

const MAX_STEM_LEN: usize = 60;

/// `mri-analysis-{sanitized_stem}--{short_hash(image bytes)}.txt`
///
/// The same image always maps to the same report name, so re-exporting
/// overwrites instead of piling up copies.
pub fn report_filename(file: &CandidateFile) -> String {
    let stem = Path::new(file.name())
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "mri-analysis-{}--{}.txt",
        sanitize_stem(&stem),
        short_hash(file.bytes())
    )
}

pub fn render_report(
    file: &CandidateFile,
    result: &ClassificationResult,
    generated_utc: &str,
) -> String {
    let view = ResultView::from(*result);
    let mut out = String::new();
    let _ = writeln!(out, "MRI Analysis Result");
    let _ = writeln!(out, "===================");
    let _ = writeln!(out, "Image: {}", file.name());
    let _ = writeln!(out, "Image size: {} bytes", file.size());
    let _ = writeln!(out, "Generated: {generated_utc}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Status: {}", view.headline);
    let classification = view
        .tumor_type
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "None".to_string());
    let _ = writeln!(out, "Classification: {classification}");
    let _ = writeln!(out, "Confidence: {}", view.confidence_label);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.summary);
    let _ = writeln!(out);
    let _ = writeln!(out, "{MEDICAL_DISCLAIMER}");
    out
}

pub fn write_report(
    dir: &Path,
    file: &CandidateFile,
    result: &ClassificationResult,
    generated_utc: &str,
) -> Result<PathBuf, PersistError> {
    let writer = AtomicFileWriter::new(dir);
    writer.write(&report_filename(file), render_report(file, result, generated_utc))
}

fn sanitize_stem(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_was_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            out.push('-');
            last_was_dash = true;
        }
    }
    let mut cleaned = out.trim_matches('-').to_string();
    if cleaned.len() > MAX_STEM_LEN {
        cleaned.truncate(MAX_STEM_LEN);
        cleaned = cleaned.trim_end_matches('-').to_string();
    }
    if cleaned.is_empty() {
        "scan".to_string()
    } else {
        cleaned
    }
}

fn short_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
