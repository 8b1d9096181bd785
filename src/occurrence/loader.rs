use super::dataset::Dataset;
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::OnceLock;

/// Reads the occurrence table at most once and hands out the shared result.
///
/// Every successful `load` after the first returns the same `Arc`.
/// A failed load is not cached, so the caller sees the error and the
/// process decides whether to abort.
pub struct Loader {
    path: PathBuf,
    data: OnceLock<Arc<Dataset>>,
}

impl Loader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data: OnceLock::new(),
        }
    }
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
    pub fn load(&self) -> Result<Arc<Dataset>> {
        if let Some(data) = self.data.get() {
            return Ok(data.clone());
        }
        let data = Arc::new(Dataset::read(&self.path)?);
        // a racing loader may have won; keep whichever landed first
        Ok(self.data.get_or_init(|| data).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_returns_identical_collection() {
        let ref mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scientificName,decimalLatitude,decimalLongitude").unwrap();
        writeln!(file, "Thunnus obesus,1.5,2.5").unwrap();
        let loader = Loader::new(file.path());
        let a = loader.load().unwrap();
        let b = loader.load().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn later_file_changes_are_not_observed() {
        let ref mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scientificName").unwrap();
        writeln!(file, "Thunnus obesus").unwrap();
        let loader = Loader::new(file.path());
        assert_eq!(loader.load().unwrap().len(), 1);
        writeln!(file, "Thunnus albacares").unwrap();
        assert_eq!(loader.load().unwrap().len(), 1);
    }

    #[test]
    fn failed_load_is_reported() {
        let loader = Loader::new("/nonexistent/occurrences.csv");
        assert!(loader.load().is_err());
        assert!(loader.load().is_err());
    }
}
