//! Shared helper functions for CLI commands

use console::style;
use miette::Result;
use std::path::Path;
use std::sync::Arc;

use crate::core::catalog::ReferenceCatalog;

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Load the reference catalog for a command
///
/// Without a path the catalog is empty. A failed load is reported on stderr
/// and validation continues with pattern rules only.
pub fn load_catalog(path: Option<&Path>) -> Arc<ReferenceCatalog> {
    let Some(path) = path else {
        return Arc::new(ReferenceCatalog::new());
    };

    let (catalog, outcome) = ReferenceCatalog::load_or_empty(path);
    match outcome {
        Ok(summary) => {
            eprintln!(
                "{} Loaded {} reference items from {}{}",
                style("→").blue(),
                style(summary.loaded).cyan(),
                path.display(),
                if summary.skipped > 0 {
                    format!(" ({} malformed rows skipped)", summary.skipped)
                } else {
                    String::new()
                }
            );
        }
        Err(e) => {
            eprintln!(
                "{} Reference data unavailable ({}); validating with pattern rules only",
                style("!").yellow().bold(),
                e
            );
        }
    }
    Arc::new(catalog)
}

/// Serialize a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("ΩΩΩΩΩΩ", 5), "ΩΩ...");
    }

    #[test]
    fn test_load_catalog_without_path_is_empty() {
        assert!(load_catalog(None).is_empty());
    }

    #[test]
    fn test_load_catalog_missing_file_degrades() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(load_catalog(Some(&tmp.path().join("none.csv"))).is_empty());
    }
}
