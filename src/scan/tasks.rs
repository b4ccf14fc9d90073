use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;

use crate::scan::ScanError;

/// Lives at the root of the metadata tree
pub static TASKS_FILE: &str = "tasks.tsv";

/// Maps task table file names (e.g. `assembly.tsv`) to the phrase used in deposition titles
/// (e.g. `assembly`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskTable {
    tasks: BTreeMap<String, String>,
}

impl TaskTable {
    pub fn load(metadata_root: &Path) -> Result<TaskTable, ScanError> {
        let path = metadata_root.join(TASKS_FILE);
        if !path.is_file() {
            return Err(ScanError::TaskTableMissing { path });
        }
        let content = fs::read_to_string(&path).map_err(|source| ScanError::Read { path: path.clone(), source })?;
        let table = TaskTable::parse(&content, &path)?;
        info!("Loaded {} tasks from {}", table.len(), path.display());
        Ok(table)
    }

    /// Two tab separated columns, blank lines are skipped
    pub fn parse(content: &str, path: &Path) -> Result<TaskTable, ScanError> {
        let mut tasks = BTreeMap::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once('\t') {
                Some((file, description)) => {
                    let description = description.split('\t').next().unwrap_or_default();
                    tasks.insert(file.trim().to_string(), description.trim_end().to_string());
                }
                None => {
                    return Err(ScanError::MalformedTask { path: path.to_path_buf(), line: i + 1 });
                }
            }
        }
        Ok(TaskTable { tasks })
    }

    pub fn description(&self, file: &str) -> Option<&str> {
        self.tasks.get(file).map(String::as_str)
    }

    /// Files that are task tables, paired with their task description. Other files are ignored.
    pub fn matching<'a>(&'a self, files: &'a [String]) -> Vec<(&'a str, &'a str)> {
        files
            .iter()
            .filter_map(|file| self.description(file).map(|task| (file.as_str(), task)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TASKS: &str = "assembly.tsv\tassembly\ngenome_binning.tsv\tgenome binning\r\n\ntaxonomic_profiling.tsv\ttaxonomic profiling  \n";

    fn table() -> TaskTable {
        TaskTable::parse(TASKS, Path::new("tasks.tsv")).unwrap()
    }

    #[test]
    fn parse_two_columns() {
        let table = table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.description("assembly.tsv"), Some("assembly"));
        assert_eq!(table.description("genome_binning.tsv"), Some("genome binning"));
        assert_eq!(table.description("taxonomic_profiling.tsv"), Some("taxonomic profiling"));
    }

    #[test]
    fn line_without_tab_is_rejected() {
        let err = TaskTable::parse("assembly.tsv\tassembly\nbroken line\n", Path::new("tasks.tsv")).unwrap_err();
        assert!(matches!(err, ScanError::MalformedTask { line: 2, .. }));
    }

    #[test]
    fn matching_ignores_files_that_are_not_tasks() {
        let table = table();
        let files = vec![
            "assembly.tsv".to_string(),
            "description.txt".to_string(),
            "README.md".to_string(),
            "taxonomic_profiling.tsv".to_string(),
        ];
        assert_eq!(
            table.matching(&files),
            vec![("assembly.tsv", "assembly"), ("taxonomic_profiling.tsv", "taxonomic profiling")]
        );
    }

    #[test]
    fn missing_task_file_points_at_github_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = TaskTable::load(dir.path()).unwrap_err();
        assert!(matches!(err, ScanError::TaskTableMissing { .. }));
        assert!(err.to_string().contains("--github_dir"));
    }

    #[test]
    fn load_from_metadata_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TASKS_FILE), TASKS).unwrap();
        assert_eq!(TaskTable::load(dir.path()).unwrap(), table());
    }
}
