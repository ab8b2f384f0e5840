//! Label image lookup by application number

use std::path::PathBuf;
use tracing::trace;

/// Maps an application number to its label image
pub trait ImageResolver: Send + Sync {
    /// `None` when no image exists for `application_num`
    fn resolve(&self, application_num: &str) -> Option<PathBuf>;
}

/// Searches directories in order for `<application_num>.png`
#[derive(Debug, Clone)]
pub struct DirectoryImageResolver {
    dirs: Vec<PathBuf>,
}

impl DirectoryImageResolver {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }
}

impl ImageResolver for DirectoryImageResolver {
    fn resolve(&self, application_num: &str) -> Option<PathBuf> {
        // Reject anything that could escape the label directories
        if application_num.is_empty()
            || application_num.contains(['/', '\\'])
            || application_num.starts_with('.')
        {
            return None;
        }

        let file_name = format!("{}.png", application_num);
        self.dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .inspect(|candidate| trace!(path = %candidate.display(), "Checking label image"))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(second.path().join("100.png"), b"b").unwrap();
        std::fs::write(second.path().join("200.png"), b"b").unwrap();
        std::fs::write(first.path().join("200.png"), b"a").unwrap();

        let resolver =
            DirectoryImageResolver::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);

        assert_eq!(resolver.resolve("100"), Some(second.path().join("100.png")));
        assert_eq!(resolver.resolve("200"), Some(first.path().join("200.png")));
        assert_eq!(resolver.resolve("300"), None);
    }

    #[test]
    fn test_rejects_path_like_numbers() {
        let dir = TempDir::new().unwrap();
        let resolver = DirectoryImageResolver::new(vec![dir.path().to_path_buf()]);
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("../etc/passwd"), None);
        assert_eq!(resolver.resolve("a/b"), None);
    }

    #[test]
    fn test_directory_named_like_image_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("5.png")).unwrap();
        let resolver = DirectoryImageResolver::new(vec![dir.path().to_path_buf()]);
        assert_eq!(resolver.resolve("5"), None);
    }
}
