use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File system abstraction so source discovery and output writing can be
/// exercised against an in-memory tree in tests.
pub trait FileSystem: Send + Sync {
    fn read_file(&self, path: &Path) -> Result<String, std::io::Error>;
    fn write_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    /// Direct children of a directory, unsorted.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, std::io::Error>;
}

/// Collect every `.swift` file under `root`, recursively, in sorted path
/// order so extraction and duplicate scanning are reproducible.
pub fn collect_swift_sources(
    fs: &dyn FileSystem,
    root: &Path,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut sources = Vec::new();
    walk_swift_sources(fs, root, &mut sources)?;
    sources.sort();
    Ok(sources)
}

fn walk_swift_sources(
    fs: &dyn FileSystem,
    dir: &Path,
    out: &mut Vec<PathBuf>,
) -> Result<(), std::io::Error> {
    for entry in fs.list_dir(dir)? {
        if fs.is_dir(&entry) {
            walk_swift_sources(fs, &entry, out)?;
        } else if entry.extension().is_some_and(|ext| ext == "swift") {
            out.push(entry);
        }
    }
    Ok(())
}

/// Real file system implementation
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
        std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }
}

/// In-memory file system for testing. Directories are implied by the paths
/// of the files added to it; writes are recorded and readable back.
pub struct MockFileSystem {
    files: Mutex<FxHashMap<PathBuf, String>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Content last written to `path`, if any.
    pub fn written(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, std::io::Error> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path.display()),
                )
            })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        files.contains_key(path) || files.keys().any(|p| p.starts_with(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        !files.contains_key(path) && files.keys().any(|p| p.starts_with(path))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
        let files = self.files.lock().unwrap();
        let mut entries: Vec<PathBuf> = files
            .keys()
            .filter_map(|p| {
                let rest = p.strip_prefix(path).ok()?;
                let first = rest.components().next()?;
                Some(path.join(first))
            })
            .collect();
        entries.sort();
        entries.dedup();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_read() {
        let fs = MockFileSystem::new();
        fs.add_file("/test.swift", "import Swinject");

        let content = fs.read_file(Path::new("/test.swift")).unwrap();
        assert_eq!(content, "import Swinject");
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFileSystem::new();
        let result = fs.read_file(Path::new("/nonexistent.swift"));
        assert!(result.is_err());
    }

    #[test]
    fn test_mock_fs_implied_directories() {
        let fs = MockFileSystem::new();
        fs.add_file("/app/Sources/A.swift", "");
        fs.add_file("/app/Sources/Feature/B.swift", "");

        assert!(fs.is_dir(Path::new("/app/Sources")));
        assert!(!fs.is_dir(Path::new("/app/Sources/A.swift")));

        let entries = fs.list_dir(Path::new("/app/Sources")).unwrap();
        assert_eq!(
            entries,
            vec![
                PathBuf::from("/app/Sources/A.swift"),
                PathBuf::from("/app/Sources/Feature"),
            ]
        );
    }

    #[test]
    fn test_collect_swift_sources_is_recursive_and_sorted() {
        let fs = MockFileSystem::new();
        fs.add_file("/app/Sources/Z.swift", "");
        fs.add_file("/app/Sources/Feature/B.swift", "");
        fs.add_file("/app/Sources/A.swift", "");
        fs.add_file("/app/Sources/notes.txt", "");

        let sources = collect_swift_sources(&fs, Path::new("/app/Sources")).unwrap();
        assert_eq!(
            sources,
            vec![
                PathBuf::from("/app/Sources/A.swift"),
                PathBuf::from("/app/Sources/Feature/B.swift"),
                PathBuf::from("/app/Sources/Z.swift"),
            ]
        );
    }
}
