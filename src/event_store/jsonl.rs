//! Durable JSON-lines store
//!
//! Raw events and transitions are kept in two append-only files under the
//! data directory. On open the transition log is replayed into an in-memory
//! index that serves every transition read. Raw events stay on disk; only
//! per-service counts are kept, and the diagnostics read scans the file.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::types::{Event, Transition};

use super::{MemoryStore, StateStore, StoreStats};

/// Configuration for the JsonlStore
#[derive(Debug, Clone)]
pub struct JsonlStoreConfig {
    /// Path to the data directory
    pub data_dir: PathBuf,
    /// fsync after every append
    pub sync_writes: bool,
    /// Skip unparseable lines on replay instead of refusing to open
    pub skip_corrupt_lines: bool,
}

impl Default for JsonlStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            sync_writes: true,
            skip_corrupt_lines: true,
        }
    }
}

impl JsonlStoreConfig {
    /// Create config with custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to events.jsonl
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join("events.jsonl")
    }

    /// Get path to transitions.jsonl
    pub fn transitions_path(&self) -> PathBuf {
        self.data_dir.join("transitions.jsonl")
    }
}

/// Open log files plus the event counters they imply
struct LogFiles {
    events: File,
    transitions: File,
    event_counts: HashMap<String, usize>,
}

/// File-backed store with an in-memory transition index
pub struct JsonlStore {
    config: JsonlStoreConfig,
    transitions: MemoryStore,
    files: Mutex<LogFiles>,
}

impl JsonlStore {
    /// Open (or create) the store and replay both logs
    pub fn open(config: JsonlStoreConfig) -> StoreResult<Self> {
        std::fs::create_dir_all(config.data_dir())?;

        let transitions = MemoryStore::new();
        let mut transition_count = 0;
        for_each_record(
            &config.transitions_path(),
            config.skip_corrupt_lines,
            Transition::from_json_line,
            |transition| {
                transitions.insert_transition(transition);
                transition_count += 1;
            },
        )?;

        let mut event_counts: HashMap<String, usize> = HashMap::new();
        for_each_record(
            &config.events_path(),
            config.skip_corrupt_lines,
            Event::from_json_line,
            |event| *event_counts.entry(event.service_name).or_default() += 1,
        )?;

        tracing::info!(
            data_dir = %config.data_dir().display(),
            events = event_counts.values().sum::<usize>(),
            transitions = transition_count,
            "replayed state logs"
        );

        let files = LogFiles {
            events: open_log(&config.events_path())?,
            transitions: open_log(&config.transitions_path())?,
            event_counts,
        };

        Ok(Self {
            config,
            transitions,
            files: Mutex::new(files),
        })
    }
}

/// Open a log for appending, terminating a torn last line if there is one
fn open_log(path: &Path) -> StoreResult<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;

    if file.metadata()?.len() > 0 {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] != b'\n' {
            tracing::warn!(path = %path.display(), "terminating incomplete last line");
            file.write_all(b"\n")?;
            file.sync_data()?;
        }
    }

    Ok(file)
}

/// Append one line, truncating back to the previous length on failure
fn append_line(file: &mut File, line: &str, sync: bool) -> StoreResult<()> {
    let len = file.metadata()?.len();

    let mut record = String::with_capacity(line.len() + 1);
    record.push_str(line);
    record.push('\n');

    let written = file
        .write_all(record.as_bytes())
        .and_then(|()| if sync { file.sync_data() } else { Ok(()) });

    if let Err(err) = written {
        match file.set_len(len) {
            Ok(()) => tracing::warn!(error = %err, "append failed, log rolled back"),
            Err(rollback) => tracing::error!(
                error = %err,
                rollback_error = %rollback,
                "append failed and log could not be rolled back"
            ),
        }
        return Err(err.into());
    }

    Ok(())
}

/// Parse every record of a JSONL file, in file order
fn for_each_record<T>(
    path: &Path,
    skip_corrupt: bool,
    parse: fn(&str) -> Result<T, serde_json::Error>,
    mut visit: impl FnMut(T),
) -> StoreResult<()> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for (line_num, line_result) in BufReader::new(file).lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match parse(&line) {
            Ok(record) => visit(record),
            Err(e) if skip_corrupt => {
                tracing::warn!(
                    path = %path.display(),
                    line = line_num + 1,
                    error = %e,
                    "skipping unparseable log line"
                );
            }
            Err(e) => {
                return Err(StoreError::Corrupted {
                    path: path.display().to_string(),
                    line: line_num + 1,
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(())
}

impl StateStore for JsonlStore {
    fn append_event(&self, event: &Event) -> StoreResult<()> {
        let line = event.to_json_line()?;
        let mut files = self.files.lock();
        append_line(&mut files.events, &line, self.config.sync_writes)?;
        *files
            .event_counts
            .entry(event.service_name.clone())
            .or_default() += 1;
        Ok(())
    }

    fn append_transition(&self, transition: &Transition) -> StoreResult<()> {
        let line = transition.to_json_line()?;
        let mut files = self.files.lock();
        append_line(&mut files.transitions, &line, self.config.sync_writes)?;
        self.transitions.insert_transition(transition.clone());
        Ok(())
    }

    fn latest_transition(&self, service_name: &str) -> StoreResult<Option<Transition>> {
        self.transitions.latest_transition(service_name)
    }

    fn transition_at(&self, service_name: &str, at: i64) -> StoreResult<Option<Transition>> {
        self.transitions.transition_at(service_name, at)
    }

    fn all_transitions(&self, service_name: &str) -> StoreResult<Vec<Transition>> {
        self.transitions.all_transitions(service_name)
    }

    fn latest_transitions(&self) -> StoreResult<Vec<Transition>> {
        self.transitions.latest_transitions()
    }

    fn events(&self, service_name: &str) -> StoreResult<Vec<Event>> {
        let files = self.files.lock();
        if !files.event_counts.contains_key(service_name) {
            return Ok(Vec::new());
        }

        // Held so no append lands mid-scan
        let mut events = Vec::new();
        for_each_record(
            &self.config.events_path(),
            true,
            Event::from_json_line,
            |event| {
                if event.service_name == service_name {
                    events.push(event);
                }
            },
        )?;
        drop(files);

        events.sort_by_key(|e| e.timestamp);
        Ok(events)
    }

    fn stats(&self) -> StoreResult<StoreStats> {
        let transition_count = self.transitions.stats()?.transition_count;
        let files = self.files.lock();
        Ok(StoreStats {
            service_count: files.event_counts.len(),
            event_count: files.event_counts.values().sum(),
            transition_count,
        })
    }
}
