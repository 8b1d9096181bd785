use super::classifier::Classifier;
use crate::query::Species;
use crate::Error;
use crate::Result;
use crate::MODEL_GENERIC;
use crate::MODEL_SUFFIX;
use std::collections::HashMap;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::OnceCell;

type Slot = Arc<OnceCell<Option<Arc<Classifier>>>>;

/// Resolves species names to classifiers stored under one directory.
///
/// Lookups go species file, then a case-insensitive match of that file
/// name, then the shared generic file. Results (including "nothing
/// found") are cached per species for the life of the process, and
/// concurrent first lookups of one species share a single load.
pub struct Repository {
    root: PathBuf,
    slots: Mutex<HashMap<Species, Slot>>,
}

impl Repository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            slots: Mutex::new(HashMap::new()),
        }
    }
    pub fn root(&self) -> &Path {
        &self.root
    }
    /// File name a species model is expected under.
    pub fn filename(name: &str) -> String {
        format!("{}{}", name.trim().replace(' ', "_"), MODEL_SUFFIX)
    }
    /// Species names must map to a plain file inside the models directory.
    fn confined(name: &str) -> Result<()> {
        let ref file = Self::filename(name);
        let mut parts = Path::new(file).components();
        match (parts.next(), parts.next()) {
            (Some(Component::Normal(_)), None) if !file.contains(['/', '\\', '\0']) => Ok(()),
            _ => Err(Error::BadInput(format!("invalid species name: {}", name))),
        }
    }

    pub async fn resolve(&self, name: &str) -> Result<Option<Arc<Classifier>>> {
        Self::confined(name)?;
        let slot = self.slot(Species::from(name))?;
        slot.get_or_try_init(|| self.load(name))
            .await
            .map(|model| model.clone())
    }

    /// Number of species whose resolution has completed.
    pub fn cached(&self) -> usize {
        self.slots
            .lock()
            .map(|slots| slots.values().filter(|s| s.initialized()).count())
            .unwrap_or_default()
    }

    fn slot(&self, species: Species) -> Result<Slot> {
        self.slots
            .lock()
            .map(|mut slots| slots.entry(species).or_default().clone())
            .map_err(|_| Error::Internal("model cache poisoned".into()))
    }

    async fn load(&self, name: &str) -> Result<Option<Arc<Classifier>>> {
        let Some(path) = self.locate(name).await? else {
            log::debug!("no model for {}", name);
            return Ok(None);
        };
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::Internal(format!("read {}: {}", path.display(), e)))?;
        Classifier::try_from(bytes.as_slice())
            .map(Arc::new)
            .map(Some)
            .map_err(|e| Error::Internal(format!("{}: {}", path.display(), e)))
            .inspect(|_| log::info!("loaded model {} for {}", path.display(), name))
            .inspect_err(|e| log::error!("{}", e))
    }

    async fn locate(&self, name: &str) -> Result<Option<PathBuf>> {
        let ref wanted = Self::filename(name);
        let exact = self.root.join(wanted);
        if tokio::fs::try_exists(&exact).await? {
            return Ok(Some(exact));
        }
        if let Some(path) = self.search(wanted).await? {
            return Ok(Some(path));
        }
        let generic = self.root.join(MODEL_GENERIC);
        match tokio::fs::try_exists(&generic).await? {
            true => Ok(Some(generic)),
            false => Ok(None),
        }
    }

    /// Case-insensitive scan of the models directory. Among several
    /// spellings of one file the smallest name wins.
    async fn search(&self, wanted: &str) -> Result<Option<PathBuf>> {
        let wanted = wanted.to_lowercase();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut found = None::<PathBuf>;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().to_lowercase() == wanted {
                let path = entry.path();
                found = match found {
                    Some(best) if best.file_name() <= path.file_name() => Some(best),
                    _ => Some(path),
                };
            }
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::tests::LOGISTIC;
    use crate::model::classifier::tests::STUMP;
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, body: &str) {
        std::fs::write(dir.path().join(file), body).unwrap();
    }

    #[test]
    fn filename_underscores_spaces() {
        assert_eq!(Repository::filename("Thunnus albacares"), "Thunnus_albacares_rf.json");
    }

    #[tokio::test]
    async fn species_file_wins_over_generic() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Thunnus_albacares_rf.json", STUMP);
        write(&dir, MODEL_GENERIC, LOGISTIC);
        let repo = Repository::new(dir.path());
        let model = repo.resolve("Thunnus albacares").await.unwrap().unwrap();
        assert_eq!(model.kind(), "forest");
    }

    #[tokio::test]
    async fn lookup_ignores_case() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Thunnus_albacares_rf.json", STUMP);
        let repo = Repository::new(dir.path());
        assert!(repo.resolve("THUNNUS ALBACARES").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn case_variants_pick_smallest_name() {
        let dir = TempDir::new().unwrap();
        write(&dir, "THUNNUS_ALBACARES_rf.json", LOGISTIC);
        write(&dir, "thunnus_albacares_rf.json", STUMP);
        let repo = Repository::new(dir.path());
        let model = repo.resolve("Thunnus Albacares").await.unwrap().unwrap();
        assert_eq!(model.kind(), "logistic");
    }

    #[tokio::test]
    async fn names_cannot_leave_the_models_dir() {
        let root = TempDir::new().unwrap();
        let models = root.path().join("models");
        let secret = root.path().join("secret");
        std::fs::create_dir(&models).unwrap();
        std::fs::create_dir(&secret).unwrap();
        std::fs::write(secret.join("x_rf.json"), STUMP).unwrap();
        std::fs::write(models.join(MODEL_GENERIC), LOGISTIC).unwrap();
        let repo = Repository::new(&models);
        let absolute = format!("{}/x", secret.display());
        for name in ["../secret/x", absolute.as_str(), "..\\secret\\x", "a\0b"] {
            assert!(matches!(repo.resolve(name).await, Err(Error::BadInput(_))), "{name}");
        }
        assert_eq!(repo.cached(), 0);
        assert_eq!(repo.resolve("..").await.unwrap().unwrap().kind(), "logistic");
    }

    #[tokio::test]
    async fn falls_back_to_generic() {
        let dir = TempDir::new().unwrap();
        write(&dir, MODEL_GENERIC, LOGISTIC);
        let repo = Repository::new(dir.path());
        let model = repo.resolve("Mola mola").await.unwrap().unwrap();
        assert_eq!(model.kind(), "logistic");
    }

    #[tokio::test]
    async fn nothing_resolves_to_none() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::new(dir.path());
        assert!(repo.resolve("Mola mola").await.unwrap().is_none());
        let repo = Repository::new(dir.path().join("missing"));
        assert!(repo.resolve("Mola mola").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_artifact_is_internal_and_retried() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Mola_mola_rf.json", "not json");
        let repo = Repository::new(dir.path());
        assert!(matches!(
            repo.resolve("Mola mola").await,
            Err(Error::Internal(_))
        ));
        write(&dir, "Mola_mola_rf.json", LOGISTIC);
        assert!(repo.resolve("Mola mola").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn loaded_models_are_cached() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Mola_mola_rf.json", LOGISTIC);
        let repo = Repository::new(dir.path());
        let a = repo.resolve("Mola mola").await.unwrap().unwrap();
        std::fs::remove_file(dir.path().join("Mola_mola_rf.json")).unwrap();
        let b = repo.resolve("mola MOLA").await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(repo.cached(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_misses_share_one_model() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Mola_mola_rf.json", STUMP);
        let repo = Arc::new(Repository::new(dir.path()));
        let handles = (0..16)
            .map(|_| repo.clone())
            .map(|repo| tokio::spawn(async move { repo.resolve("Mola mola").await }))
            .collect::<Vec<_>>();
        let mut models = Vec::new();
        for handle in handles {
            models.push(handle.await.unwrap().unwrap().unwrap());
        }
        assert!(models.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
