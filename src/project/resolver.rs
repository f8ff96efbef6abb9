//! Search path resolution from redirection files.

use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use super::config::RedirectionConfig;
use super::error::RedirectionError;
use super::redirection::{
    RedirectionLine, expand_macros, mask_matches, parse_redirection, section_applies,
};

/// Directories per lower-cased extension, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectionTable {
    entries: IndexMap<String, IndexSet<String>>,
}

impl RedirectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory; repeats keep their first position.
    pub fn insert(&mut self, extension: &str, directory: impl Into<String>) {
        self.entries
            .entry(normalize_extension(extension))
            .or_default()
            .insert(directory.into());
    }

    pub fn paths(&self, extension: &str) -> Vec<String> {
        self.entries
            .get(&normalize_extension(extension))
            .map(|dirs| dirs.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

type MemoKey = (String, Option<PathBuf>);

/// Resolves ordered search directories for file extensions.
///
/// Results are memoized per (extension, project directory) until
/// [`clear_cache`](Self::clear_cache).
#[derive(Debug, Default)]
pub struct RedirectionResolver {
    config: RedirectionConfig,
    memo: RwLock<FxHashMap<MemoKey, Arc<Vec<String>>>>,
}

impl RedirectionResolver {
    pub fn new(config: RedirectionConfig) -> Self {
        Self {
            config,
            memo: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn config(&self) -> &RedirectionConfig {
        &self.config
    }

    /// Ordered, de-duplicated directories searched for `extension`.
    ///
    /// The directory holding the redirection file comes first. Without a
    /// project directory only the global file in `bin_dir` is used. A
    /// missing or unreadable redirection file yields an empty list.
    pub fn resolve_search_paths(&self, extension: &str, project_dir: Option<&Path>) -> Vec<String> {
        let key = (normalize_extension(extension), project_dir.map(Path::to_path_buf));
        if let Some(paths) = self.memo.read().get(&key) {
            return paths.as_ref().clone();
        }

        let paths = match self.build_table(&key.0, project_dir) {
            Ok(table) => table.paths(&key.0),
            Err(err) => {
                tracing::warn!(extension = %key.0, project = ?project_dir, "{err}");
                Vec::new()
            }
        };
        tracing::debug!(extension = %key.0, count = paths.len(), "resolved search paths");
        self.memo.write().insert(key, Arc::new(paths.clone()));
        paths
    }

    /// Union of the search paths of several projects, in project order.
    pub fn resolve_for_projects<P: AsRef<Path>>(&self, extension: &str, dirs: &[P]) -> Vec<String> {
        let mut seen = IndexSet::new();
        for dir in dirs {
            seen.extend(self.resolve_search_paths(extension, Some(dir.as_ref())));
        }
        seen.into_iter().collect()
    }

    /// Locate `name` in the search directories for its extension.
    ///
    /// Relative directories are tried against the project directory, then
    /// against the redirection file's directory. File names compare
    /// case-insensitively.
    pub fn find_file(&self, name: &str, project_dir: &Path) -> Option<PathBuf> {
        let extension = Path::new(name).extension()?.to_str()?;
        let paths = self.resolve_search_paths(extension, Some(project_dir));
        let red_dir = paths.first().map(PathBuf::from);

        for dir in &paths {
            let dir = PathBuf::from(native_separators(dir));
            let bases: Vec<PathBuf> = if dir.is_absolute() {
                vec![dir]
            } else {
                std::iter::once(project_dir.join(&dir))
                    .chain(red_dir.as_ref().map(|red| red.join(&dir)))
                    .collect()
            };
            if let Some(found) = bases.iter().find_map(|base| file_in(base, name)) {
                tracing::debug!(file = name, path = %found.display(), "found file via redirection");
                return Some(found);
            }
        }
        tracing::debug!(file = name, "file not found in search paths");
        None
    }

    /// Drop all memoized results.
    pub fn clear_cache(&self) {
        self.memo.write().clear();
    }

    /// The redirection file for a project: local first, then the global one
    pub fn locate_redirection_file(
        &self,
        project_dir: Option<&Path>,
    ) -> Result<PathBuf, RedirectionError> {
        let name = &self.config.redirection_file;
        let mut searched: Vec<PathBuf> =
            project_dir.map(|dir| dir.join(name)).into_iter().collect();
        if let Some(bin) = &self.config.bin_dir {
            searched.push(PathBuf::from(native_separators(bin)).join(name));
        }
        if let Some(found) = searched.iter().find(|path| path.is_file()).cloned() {
            return Ok(found);
        }
        Err(RedirectionError::NotFound {
            name: name.clone(),
            searched,
        })
    }

    fn build_table(
        &self,
        extension: &str,
        project_dir: Option<&Path>,
    ) -> Result<RedirectionTable, RedirectionError> {
        let file = self.locate_redirection_file(project_dir)?;
        let mut table = RedirectionTable::new();
        if let Some(red_dir) = file.parent() {
            table.insert(extension, red_dir.display().to_string());
        }

        let mut visiting = FxHashSet::default();
        self.collect(&file, extension, &mut table, &mut visiting)?;
        Ok(table)
    }

    /// Add the matching entries of one file, following includes
    fn collect(
        &self,
        file: &Path,
        extension: &str,
        table: &mut RedirectionTable,
        visiting: &mut FxHashSet<PathBuf>,
    ) -> Result<(), RedirectionError> {
        let key = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
        if !visiting.insert(key.clone()) {
            return Err(RedirectionError::IncludeCycle(key));
        }
        let text = std::fs::read_to_string(file).map_err(|e| RedirectionError::read(file, e))?;
        tracing::debug!(path = %file.display(), "loaded redirection file");

        let compile_mode = self.config.compile_mode.as_deref();
        let mut section: Option<String> = None;
        for line in parse_redirection(&text) {
            match line {
                RedirectionLine::Section(name) => section = Some(name),
                _ if !section_applies(section.as_deref(), compile_mode) => {}
                RedirectionLine::Mapping { mask, paths } => {
                    if mask_matches(&mask, extension) {
                        for path in paths {
                            table.insert(extension, expand_macros(&path, &self.config));
                        }
                    }
                }
                RedirectionLine::Include(target) => {
                    let target = PathBuf::from(native_separators(&expand_macros(&target, &self.config)));
                    let target = match file.parent() {
                        Some(dir) if target.is_relative() => dir.join(target),
                        _ => target,
                    };
                    match self.collect(&target, extension, table, visiting) {
                        Ok(()) => {}
                        Err(RedirectionError::IncludeCycle(path)) => {
                            tracing::debug!(path = %path.display(), "skipping cyclic include");
                        }
                        Err(err) => tracing::warn!("{err}"),
                    }
                }
            }
        }

        visiting.remove(&key);
        Ok(())
    }
}

fn native_separators(path: &str) -> String {
    path.replace(['\\', '/'], MAIN_SEPARATOR_STR)
}

/// `dir/name`, matching the file name case-insensitively
fn file_in(dir: &Path, name: &str) -> Option<PathBuf> {
    let exact = dir.join(name);
    if exact.is_file() {
        return Some(exact);
    }
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
}
