//! Serial write transaction for tangled targets.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A pending write of one tangled target.
#[derive(Debug, Clone)]
pub struct WriteAction {
    /// Target file path.
    pub path: PathBuf,
    /// Content to write.
    pub content: String,
    /// Number of blocks contributing to the target.
    pub block_count: usize,
}

impl WriteAction {
    /// Returns a description of this action for dry runs.
    pub fn describe(&self) -> String {
        format!(
            "{} ({} bytes, {} blocks)",
            self.path.display(),
            self.content.len(),
            self.block_count
        )
    }

    fn execute(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        atomic_write(&self.path, &self.content)
    }
}

/// Outcome of executing a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteReport {
    /// Targets written successfully.
    pub written: usize,
    /// Targets that failed to write.
    pub failed: usize,
}

/// An ordered list of writes, executed serially.
///
/// A failed write aborts only its own target; remaining targets still run.
#[derive(Debug, Default)]
pub struct Transaction {
    actions: Vec<WriteAction>,
}

impl Transaction {
    /// Creates an empty transaction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a write.
    pub fn write(&mut self, path: impl Into<PathBuf>, content: String, block_count: usize) {
        self.actions.push(WriteAction {
            path: path.into(),
            content,
            block_count,
        });
    }

    /// Returns the queued actions.
    pub fn actions(&self) -> &[WriteAction] {
        &self.actions
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of queued actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Describes all actions for dry runs.
    pub fn describe(&self) -> Vec<String> {
        self.actions.iter().map(WriteAction::describe).collect()
    }

    /// Executes all writes serially, logging failures and continuing.
    pub fn execute(&self) -> ExecuteReport {
        let mut report = ExecuteReport::default();

        for action in &self.actions {
            match action.execute() {
                Ok(()) => {
                    tracing::debug!("wrote {}", action.path.display());
                    report.written += 1;
                }
                Err(e) => {
                    tracing::error!("failed to write {}: {}", action.path.display(), e);
                    report.failed += 1;
                }
            }
        }

        report
    }
}

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Writes content via a temp file in the same directory, then renames it
/// into place.
fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "target".to_string());
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_path = path.with_file_name(format!(".{}.tmp{}", file_name, counter));

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    match fs::rename(&temp_path, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested/deep/out.ts");

        let mut transaction = Transaction::new();
        transaction.write(target.clone(), "const x = 1;\n".to_string(), 1);
        let report = transaction.execute();

        assert_eq!(report.written, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(fs::read_to_string(target).unwrap(), "const x = 1;\n");
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.txt");

        let mut transaction = Transaction::new();
        transaction.write(target, "hi\n".to_string(), 1);
        transaction.execute();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["out.txt"]);
    }

    #[test]
    fn test_describe_reports_bytes_and_blocks() {
        let mut transaction = Transaction::new();
        transaction.write(PathBuf::from("out.ts"), "abcde".to_string(), 3);

        let descriptions = transaction.describe();
        assert_eq!(descriptions, vec!["out.ts (5 bytes, 3 blocks)"]);
    }

    #[test]
    fn test_overwrite_existing_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.txt");
        fs::write(&target, "old").unwrap();

        let mut transaction = Transaction::new();
        transaction.write(target.clone(), "new\n".to_string(), 1);
        let report = transaction.execute();

        assert_eq!(report.written, 1);
        assert_eq!(fs::read_to_string(target).unwrap(), "new\n");
    }

    #[test]
    fn test_empty_transaction() {
        let transaction = Transaction::new();
        assert!(transaction.is_empty());
        assert_eq!(transaction.execute(), ExecuteReport::default());
    }
}
