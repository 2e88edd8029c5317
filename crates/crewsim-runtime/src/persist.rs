//! JSON Lines persistence for task results and span dumps.
//!
//! One JSON object per line. Blank lines are skipped on read.

use crewsim_core::types::TaskResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors reading or writing a JSONL file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A line that is not a valid record. Lines are 1-based.
    #[error("Malformed record on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Write records to `path`, replacing any existing file. Parent directories are created.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> PersistResult<()> {
    ensure_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        write_line(&mut writer, record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Append one record to `path`, creating the file if needed.
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> PersistResult<()> {
    ensure_parent(path)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_line(&mut writer, record)?;
    writer.flush()?;
    Ok(())
}

/// Read every record from `path`.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> PersistResult<Vec<T>> {
    parse_jsonl(BufReader::new(File::open(path)?))
}

/// Parse records from any buffered reader.
pub fn parse_jsonl<T: DeserializeOwned, R: BufRead>(reader: R) -> PersistResult<Vec<T>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| PersistError::Malformed {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

pub fn write_results(path: &Path, results: &[TaskResult]) -> PersistResult<()> {
    write_jsonl(path, results)
}

pub fn append_result(path: &Path, result: &TaskResult) -> PersistResult<()> {
    append_jsonl(path, result)
}

pub fn read_results(path: &Path) -> PersistResult<Vec<TaskResult>> {
    read_jsonl(path)
}

fn write_line<T: Serialize, W: Write>(writer: &mut W, record: &T) -> PersistResult<()> {
    serde_json::to_writer(&mut *writer, record).map_err(PersistError::Serialize)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewsim_core::types::{SubtaskResult, Verdict};

    fn sample(task: &str) -> TaskResult {
        TaskResult::assemble(
            task,
            task,
            vec!["Write handler".into()],
            vec![SubtaskResult {
                subtask: "Write handler".into(),
                code: "return 1".into(),
                result: Verdict::Approved,
                similarity: 0.25,
            }],
            vec![],
        )
    }

    #[test]
    fn line_shape_matches_results_format() {
        let mut buf = Vec::new();
        write_line(&mut buf, &sample("Add caching")).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        for key in [
            "task",
            "original_task",
            "workflow",
            "subtask_results",
            "similarity",
            "errors",
            "error_sources",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["subtask_results"][0]["result"], "Approved");
        assert_eq!(value["subtask_results"][0]["similarity"], 0.25);
    }

    #[test]
    fn blank_lines_are_skipped_and_bad_lines_named() {
        let good = serde_json::to_string(&sample("a")).unwrap();
        let input = format!("{good}\n\n   \n{good}\n");
        let parsed: Vec<TaskResult> = parse_jsonl(input.as_bytes()).unwrap();
        assert_eq!(parsed.len(), 2);

        let input = format!("{good}\n{{not json\n");
        let err = parse_jsonl::<TaskResult, _>(input.as_bytes()).unwrap_err();
        assert!(matches!(err, PersistError::Malformed { line: 2, .. }));
        assert!(err.to_string().contains("line 2"));
    }
}
