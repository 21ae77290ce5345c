//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn read_head(
        &self,
        path: &Path,
        len: usize,
    ) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
        // One descriptor at a time: opened, read and closed before returning.
        let file = std::fs::File::open(path)?;
        let mut head = Vec::with_capacity(len);
        file.take(len as u64).read_to_end(&mut head)?;
        Ok(head)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn walk_files(
        &self,
        root: &Path,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_head_stops_at_len_and_at_eof() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.cpp");
        std::fs::write(&path, "//crc64:0123456789abcdef\n#include \"a.h\"\n").unwrap();

        assert_eq!(LiveFileSystem.read_head(&path, 8).unwrap(), b"//crc64:");
        let all = LiveFileSystem.read_head(&path, 1024).unwrap();
        assert_eq!(all.len(), std::fs::metadata(&path).unwrap().len() as usize);
        assert!(LiveFileSystem.read_head(&dir.path().join("missing.cpp"), 8).is_err());
    }

    #[test]
    fn walk_files_recurses_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("o_1")).unwrap();
        std::fs::create_dir_all(dir.path().join("cl")).unwrap();
        std::fs::write(dir.path().join("o_1/b.cpp"), "").unwrap();
        std::fs::write(dir.path().join("cl/C@A.h"), "").unwrap();

        let files = LiveFileSystem.walk_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("cl/C@A.h"), dir.path().join("o_1/b.cpp")]);
        assert!(LiveFileSystem.is_dir(&dir.path().join("cl")));
        assert!(!LiveFileSystem.is_dir(&dir.path().join("o_1/b.cpp")));
    }
}
