use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{default_source_extension, default_template_suffix, ScanConfig};
use crate::convert::Target;
use crate::errors::{MigrateError, Result};

/// Finds the files a run should convert.
///
/// Names ending in the template suffix are always included. Other files with
/// the source extension are included only when their content mentions one of
/// the active markers, so plain PHP classes without legacy helpers are never
/// touched.
pub struct FileCollector {
    root: PathBuf,
    template_suffix: String,
    source_extension: String,
    markers: Vec<&'static str>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileCollector {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            template_suffix: default_template_suffix(),
            source_extension: default_source_extension(),
            markers: Target::All.markers().collect(),
            ignore_patterns: vec![],
        }
    }

    pub fn with_scan_config(self, scan: &ScanConfig) -> Self {
        Self {
            template_suffix: scan.template_suffix.clone(),
            source_extension: scan.source_extension.clone(),
            ..self
        }
        .with_ignore_patterns(&scan.ignore)
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.markers = target.markers().collect();
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    log::warn!("Ignoring invalid ignore pattern '{pattern}': {e}");
                    None
                }
            })
            .collect();
        self
    }

    /// Lazily walk the root, yielding matching files in walk order.
    pub fn files(&self) -> Result<impl Iterator<Item = PathBuf> + '_> {
        if !self.root.exists() {
            return Err(MigrateError::walk(&self.root, "path does not exist"));
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        Ok(walker
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.into_path()),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {e}");
                    None
                }
            })
            .filter(move |path| path.is_file() && self.should_process(path)))
    }

    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        Ok(self.files()?.collect())
    }

    fn should_process(&self, path: &Path) -> bool {
        if self.is_ignored(path) {
            return false;
        }

        let is_template = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(&self.template_suffix))
            .unwrap_or(false);
        if is_template {
            return true;
        }

        path.extension() == Some(OsStr::new(&self.source_extension)) && self.mentions_marker(path)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }

    fn mentions_marker(&self, path: &Path) -> bool {
        match fs::read_to_string(path) {
            Ok(content) => self.markers.iter().any(|marker| content.contains(marker)),
            Err(e) => {
                log::warn!("Skipping {}: {e}", path.display());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn sorted(mut files: Vec<PathBuf>) -> Vec<PathBuf> {
        files.sort();
        files
    }

    #[test]
    fn test_templates_always_included() {
        let dir = TempDir::new().unwrap();
        let template = touch(dir.path(), "plain.blade.php", "<p>hello</p>");

        let files = FileCollector::new(dir.path().to_path_buf()).collect().unwrap();
        assert_eq!(files, vec![template]);
    }

    #[test]
    fn test_source_files_need_a_marker() {
        let dir = TempDir::new().unwrap();
        let with_form = touch(dir.path(), "Helper.php", "<?php echo Form::close(); ?>");
        touch(dir.path(), "Model.php", "<?php class Model {}");
        touch(dir.path(), "notes.txt", "Form::open()");

        let files = FileCollector::new(dir.path().to_path_buf()).collect().unwrap();
        assert_eq!(files, vec![with_form]);
    }

    #[test]
    fn test_marker_check_follows_target() {
        let dir = TempDir::new().unwrap();
        let html = touch(dir.path(), "assets.php", "Html::script('app.js')");

        let form_only = FileCollector::new(dir.path().to_path_buf())
            .with_target(Target::Form)
            .collect()
            .unwrap();
        assert!(form_only.is_empty());

        let html_only = FileCollector::new(dir.path().to_path_buf())
            .with_target(Target::Html)
            .collect()
            .unwrap();
        assert_eq!(html_only, vec![html]);
    }

    #[test]
    fn test_ignore_patterns_relative_to_root() {
        let dir = TempDir::new().unwrap();
        let kept = touch(dir.path(), "users/index.blade.php", "");
        touch(dir.path(), "vendor/pkg/view.blade.php", "");

        let files = FileCollector::new(dir.path().to_path_buf())
            .with_ignore_patterns(&["vendor/**".to_string()])
            .collect()
            .unwrap();
        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn test_scan_config_suffix() {
        let dir = TempDir::new().unwrap();
        let twig = touch(dir.path(), "page.tpl.php", "");
        touch(dir.path(), "other.blade.php", "");

        let scan = ScanConfig {
            template_suffix: ".tpl.php".to_string(),
            source_extension: "inc".to_string(),
            ignore: vec![],
        };
        let files = FileCollector::new(dir.path().to_path_buf())
            .with_scan_config(&scan)
            .collect()
            .unwrap();
        assert_eq!(files, vec![twig]);
    }

    #[test]
    fn test_nested_directories() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a/one.blade.php", "");
        let b = touch(dir.path(), "a/b/two.blade.php", "");

        let files = sorted(FileCollector::new(dir.path().to_path_buf()).collect().unwrap());
        assert_eq!(files, sorted(vec![a, b]));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = FileCollector::new(dir.path().join("nope")).collect();
        assert!(matches!(result, Err(MigrateError::Walk { .. })));
    }
}
