use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::DiscoveryError;
use crate::utils;

/// How the user picked the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    SingleFile,
    Directory,
}

/// One file slated for processing within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    pub path: PathBuf,
}

impl FileTask {
    /// Name used in log messages.
    pub fn name(&self) -> String {
        utils::file_label(&self.path)
    }
}

/// Resolve the selected path into the fixed, ordered task list for a run.
pub fn discover(path: &Path, mode: SelectionMode) -> Result<Vec<FileTask>, DiscoveryError> {
    match mode {
        SelectionMode::SingleFile => Ok(single_file(path)),
        SelectionMode::Directory => directory(path),
    }
}

fn single_file(path: &Path) -> Vec<FileTask> {
    if utils::has_pdf_suffix(path) {
        vec![FileTask {
            path: path.to_path_buf(),
        }]
    } else {
        vec![]
    }
}

/// Direct children only, sorted by file name.
fn directory(root: &Path) -> Result<Vec<FileTask>, DiscoveryError> {
    let meta = fs::metadata(root).map_err(|source| DiscoveryError::Inaccessible {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    let mut tasks = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| DiscoveryError::Listing {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        if utils::has_pdf_suffix(entry.path()) {
            tasks.push(FileTask {
                path: entry.into_path(),
            });
        }
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn names(tasks: &[FileTask]) -> Vec<String> {
        tasks.iter().map(FileTask::name).collect()
    }

    /// Helper: a folder with a mix of PDFs, other files and a nested PDF.
    fn setup_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.pdf"), "").unwrap();
        fs::write(dir.path().join("A.PDF"), "").unwrap();
        fs::write(dir.path().join("c.Pdf"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("pdf"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.pdf"), "").unwrap();
        fs::create_dir(dir.path().join("folder.pdf")).unwrap();
        dir
    }

    #[test]
    fn directory_lists_direct_pdf_children_in_name_order() {
        let dir = setup_test_dir();

        let tasks = discover(dir.path(), SelectionMode::Directory).unwrap();

        assert_eq!(names(&tasks), ["A.PDF", "b.pdf", "c.Pdf"]);
        assert!(tasks.iter().all(|t| t.path.parent() == Some(dir.path())));
    }

    #[test]
    fn directory_never_recurses() {
        let dir = setup_test_dir();

        let tasks = discover(dir.path(), SelectionMode::Directory).unwrap();

        assert!(!names(&tasks).contains(&"deep.pdf".to_string()));
    }

    #[test]
    fn empty_directory_yields_no_tasks() {
        let dir = TempDir::new().unwrap();
        assert!(discover(dir.path(), SelectionMode::Directory)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = discover(&dir.path().join("absent"), SelectionMode::Directory).unwrap_err();
        assert!(matches!(err, DiscoveryError::Inaccessible { .. }));
    }

    #[test]
    fn file_given_as_directory_is_an_error() {
        let dir = setup_test_dir();
        let err = discover(&dir.path().join("b.pdf"), SelectionMode::Directory).unwrap_err();
        assert!(matches!(err, DiscoveryError::NotADirectory(_)));
    }

    #[test]
    fn single_file_keeps_pdf_path() {
        let path = Path::new("/somewhere/Report.PDF");
        let tasks = discover(path, SelectionMode::SingleFile).unwrap();
        assert_eq!(tasks, [FileTask { path: path.to_path_buf() }]);
    }

    #[test]
    fn single_file_rejects_other_suffixes() {
        let tasks = discover(Path::new("/somewhere/report.docx"), SelectionMode::SingleFile).unwrap();
        assert!(tasks.is_empty());
    }
}
