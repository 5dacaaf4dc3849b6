//! Post-tangle cleanup of stale build caches.

use std::path::Path;

/// Removes files matching the clean patterns under the output directory.
///
/// Incremental TypeScript builds leave `*.tsbuildinfo` files behind that go
/// stale once their inputs are regenerated. Every failure here is a
/// warning; cleanup never fails the run.
///
/// Returns the number of files removed.
pub fn clean_build_caches(out_dir: &Path, patterns: &[String]) -> usize {
    if !out_dir.is_dir() {
        return 0;
    }

    let mut removed = 0;

    for pattern in patterns {
        let full_pattern = out_dir.join(pattern);
        let Some(pattern_str) = full_pattern.to_str() else {
            tracing::warn!("skipping non-UTF-8 clean pattern under {}", out_dir.display());
            continue;
        };

        let paths = match glob::glob(pattern_str) {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!("invalid clean pattern '{}': {}", pattern, e);
                continue;
            }
        };

        for entry in paths {
            match entry {
                Ok(path) => match std::fs::remove_file(&path) {
                    Ok(()) => {
                        tracing::debug!("removed stale cache {}", path.display());
                        removed += 1;
                    }
                    Err(e) => {
                        tracing::warn!("could not remove {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    tracing::warn!("cache cleanup: {}", e);
                }
            }
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn patterns() -> Vec<String> {
        vec!["**/*.tsbuildinfo".to_string()]
    }

    #[test]
    fn test_removes_tsbuildinfo_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tsconfig.tsbuildinfo"), "{}").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/app.tsbuildinfo"), "{}").unwrap();
        fs::write(dir.path().join("keep.js"), "x").unwrap();

        let removed = clean_build_caches(dir.path(), &patterns());

        assert_eq!(removed, 2);
        assert!(!dir.path().join("tsconfig.tsbuildinfo").exists());
        assert!(!dir.path().join("sub/app.tsbuildinfo").exists());
        assert!(dir.path().join("keep.js").exists());
    }

    #[test]
    fn test_missing_out_dir_is_noop() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert_eq!(clean_build_caches(&missing, &patterns()), 0);
    }

    #[test]
    fn test_invalid_pattern_is_tolerated() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.tsbuildinfo"), "{}").unwrap();

        let patterns = vec!["[".to_string(), "**/*.tsbuildinfo".to_string()];
        let removed = clean_build_caches(dir.path(), &patterns);
        assert_eq!(removed, 1);
    }
}
