//! Output file naming: `<pdf base name>_clean.<ext>`.

use std::path::{Path, PathBuf};

pub const CLEAN_SUFFIX: &str = "_clean";

/// Base name of the output artifact for a source file name.
///
/// Directories and the final extension are dropped:
/// `statements/march.pdf` becomes `march_clean`.
pub fn output_stem(source_name: &str) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("statement");
    format!("{stem}{CLEAN_SUFFIX}")
}

/// `<dir>/<stem>.xlsx`
pub fn workbook_path(dir: &Path, source_name: &str) -> PathBuf {
    dir.join(format!("{}.xlsx", output_stem(source_name)))
}

/// Where output goes when nothing else is configured.
pub fn default_output_dir() -> PathBuf {
    std::env::temp_dir()
}
