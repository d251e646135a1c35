//! Input and output path validation for the CLI
//!
//! Safety checks run before a conversion starts: inputs must exist, the
//! output directory must exist, and the output path must not silently
//! overwrite one of the inputs.

use std::path::{Path, PathBuf};

/// Normalize a path to an absolute form, resolving symlinks when the path
/// exists on disk.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Check that every input file exists; returns one message per missing file
pub fn validate_input_files_exist(inputs: &[PathBuf]) -> Vec<String> {
    inputs
        .iter()
        .filter(|path| !path.is_file())
        .map(|path| format!("Input file not found: {}", path.display()))
        .collect()
}

/// Detect an output path that would overwrite one of the inputs
pub fn validate_output_not_input(inputs: &[PathBuf], output: &Path) -> Option<String> {
    let normalized_output = normalize_path(output);
    for input in inputs {
        if normalize_path(input) == normalized_output {
            return Some(format!(
                "Output path would overwrite input file: {}",
                input.display()
            ));
        }
    }
    None
}

/// Check that the output file's parent directory exists
pub fn validate_output_directory(output: &Path) -> Option<String> {
    match output.parent() {
        // An empty parent means the current directory
        None => None,
        Some(parent) if parent.as_os_str().is_empty() => None,
        Some(parent) if parent.is_dir() => None,
        Some(parent) => Some(format!(
            "Output directory does not exist: {}",
            parent.display()
        )),
    }
}

/// Warn when the output carries a .csv extension; the output is JSON and a
/// .csv name invites confusing the converted file with an input statement.
pub fn validate_csv_extension_warning(output: &Path) -> Option<String> {
    let is_csv = output
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        Some(format!(
            "Output path {} has a .csv extension; the output format is JSON",
            output.display()
        ))
    } else {
        None
    }
}

/// Run every path check and collect the messages.
///
/// `force_overwrite` bypasses the output-collision check only; existence
/// checks and the extension warning still apply.
pub fn validate_file_paths(inputs: &[PathBuf], output: &Path, force_overwrite: bool) -> Vec<String> {
    let mut messages = validate_input_files_exist(inputs);

    if !force_overwrite {
        if let Some(message) = validate_output_not_input(inputs, output) {
            messages.push(message);
        }
    }
    if let Some(message) = validate_output_directory(output) {
        messages.push(message);
    }
    if let Some(message) = validate_csv_extension_warning(output) {
        messages.push(message);
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path_makes_absolute() {
        let normalized = normalize_path(Path::new("some/relative.csv"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_missing_inputs_reported() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("exists.csv");
        File::create(&existing).unwrap();
        let missing = dir.path().join("missing.csv");

        let errors = validate_input_files_exist(&[existing, missing.clone()]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("missing.csv"));
    }

    #[test]
    fn test_output_collision_detected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("file1.csv");
        File::create(&input).unwrap();

        let error = validate_output_not_input(&[input.clone()], &input);
        assert!(error.is_some());
        assert!(error.unwrap().contains("overwrite"));

        let other = dir.path().join("output.ndjson");
        assert!(validate_output_not_input(&[input], &other).is_none());
    }

    #[test]
    fn test_output_directory_must_exist() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("output.ndjson");
        assert!(validate_output_directory(&good).is_none());

        let bad = dir.path().join("nonexistent").join("output.ndjson");
        let error = validate_output_directory(&bad);
        assert!(error.is_some());
        assert!(error.unwrap().contains("directory"));
    }

    #[test]
    fn test_csv_extension_warns() {
        assert!(validate_csv_extension_warning(Path::new("out.csv")).is_some());
        assert!(validate_csv_extension_warning(Path::new("out.ndjson")).is_none());
        assert!(validate_csv_extension_warning(Path::new("out.json")).is_none());
    }

    #[test]
    fn test_force_overwrite_bypasses_collision() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("file1.csv");
        File::create(&input).unwrap();

        let messages = validate_file_paths(&[input.clone()], &input, true);
        assert!(!messages.iter().any(|m| m.contains("overwrite")));

        let messages = validate_file_paths(&[input.clone()], &input, false);
        assert!(messages.iter().any(|m| m.contains("overwrite")));
    }
}
