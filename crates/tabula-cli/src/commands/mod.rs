//! CLI command implementations.

pub mod analyze;
pub mod chart;
pub mod clean;
pub mod drift;
pub mod filter;
pub mod importance;
pub mod insights;
pub mod model;
pub mod profile;
pub mod serve;

use std::path::Path;

use tabula::{Dataset, Tabula};

/// Load and analyze a data file, failing early when it does not exist.
pub(crate) fn load_dataset(file: &Path) -> Result<Dataset, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    let (dataset, _source) = Tabula::new().load_dataset(file)?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_dataset() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"city,temp\nNYC,20\nLA,25\n").unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.total_rows(), 2);
        assert!(dataset.column("temp").unwrap().is_numeric());
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/data.csv")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
