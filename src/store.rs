use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use tracing::debug;

/// One directory eligible for selection. Immutable once loaded; timestamps
/// are seconds since the epoch with zero meaning the filesystem did not say.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub basename: String,
    pub path: PathBuf,
    pub created_at: f64,
    pub modified_at: f64,
}

/// Load-once cache of the try directories under a base path. The directory
/// is scanned a single time per session; a try created mid-session by
/// another process will not appear until the next one.
#[derive(Debug)]
pub struct Store {
    base: PathBuf,
    cached: Option<Vec<Candidate>>,
}

impl Store {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            cached: None,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The cached candidate list, scanning the filesystem on first call.
    /// Filesystem failures (missing or unreadable base path) yield an empty
    /// list rather than an error.
    pub fn entries(&mut self) -> &[Candidate] {
        if self.cached.is_none() {
            let loaded = load(&self.base);
            debug!(base = %self.base.display(), count = loaded.len(), "scanned try directories");
            self.cached = Some(loaded);
        }
        self.cached.as_deref().unwrap_or_default()
    }
}

fn load(base: &Path) -> Vec<Candidate> {
    if let Err(err) = fs::create_dir_all(base) {
        debug!(base = %base.display(), %err, "could not create base path");
    }
    let entries = match fs::read_dir(base) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut out = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(_) => continue,
        };
        if !metadata.is_dir() {
            continue;
        }
        let (created_at, modified_at) = extract_times(&metadata);
        out.push(Candidate {
            basename: entry.file_name().to_string_lossy().into_owned(),
            path,
            created_at,
            modified_at,
        });
    }
    out
}

/// Creation and modification time as epoch seconds. Creation prefers the
/// platform birth time and falls back to the Unix change time; zero when
/// neither is available.
fn extract_times(metadata: &Metadata) -> (f64, f64) {
    let modified_at = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    (creation_time(metadata), modified_at)
}

fn creation_time(metadata: &Metadata) -> f64 {
    if let Ok(birth) = metadata.created() {
        if let Ok(d) = birth.duration_since(UNIX_EPOCH) {
            return d.as_secs_f64();
        }
    }
    change_time(metadata)
}

#[cfg(unix)]
fn change_time(metadata: &Metadata) -> f64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ctime() as f64 + metadata.ctime_nsec() as f64 / 1e9
}

#[cfg(not(unix))]
fn change_time(_metadata: &Metadata) -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::Store;
    use std::fs;

    #[test]
    fn missing_base_path_is_created_and_yields_empty_list() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let base = tmp.path().join("tries");
        let mut store = Store::new(&base);
        assert!(store.entries().is_empty());
        assert!(base.is_dir());
    }

    #[test]
    fn lists_only_directories() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join("2024-01-01-alpha")).expect("mkdir");
        fs::create_dir(tmp.path().join("beta")).expect("mkdir");
        fs::write(tmp.path().join("stray-file"), b"x").expect("write");

        let mut store = Store::new(tmp.path());
        let mut names: Vec<&str> = store.entries().iter().map(|c| c.basename.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["2024-01-01-alpha", "beta"]);
    }

    #[test]
    fn timestamps_are_populated() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join("alpha")).expect("mkdir");
        let mut store = Store::new(tmp.path());
        let candidate = &store.entries()[0];
        assert!(candidate.modified_at > 0.0);
        assert!(candidate.created_at > 0.0);
    }

    #[test]
    fn scan_happens_once_per_session() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::create_dir(tmp.path().join("alpha")).expect("mkdir");
        let mut store = Store::new(tmp.path());
        assert_eq!(store.entries().len(), 1);

        fs::create_dir(tmp.path().join("late-arrival")).expect("mkdir");
        assert_eq!(store.entries().len(), 1);
    }
}
