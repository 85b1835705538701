//! List store contract with plain-text file and in-memory implementations.
//!
//! # Responsibility
//! - Read the persisted list line-by-line into an ordered sequence.
//! - Rewrite the persisted list with one terminated line per item.
//!
//! # Invariants
//! - Line order on disk equals list order in memory.
//! - Invalid UTF-8 bytes load as U+FFFD instead of discarding the file.
//! - Every written line carries a terminator, so `[""]` and `[]` stay
//!   distinguishable on reload.
//! - Failures are logged with metadata only; item text is never logged.

use log::{error, info, warn};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the persisted list inside the data directory.
pub const DATA_FILE_NAME: &str = "data.txt";

/// Platform default line terminator used when writing.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Platform default line terminator used when writing.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store write failure.
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: std::io::Error },
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Unavailable(_) => None,
        }
    }
}

/// Load/save contract for the persisted to-do list.
pub trait ListStore {
    /// Returns the persisted items in order, or an empty list on any failure.
    fn load(&self) -> Vec<String>;
    /// Overwrites persisted state with `items`.
    fn save(&self, items: &[String]) -> StoreResult<()>;
}

/// Plain-text file store: one item per line.
#[derive(Debug, Clone)]
pub struct FileListStore {
    path: PathBuf,
}

impl FileListStore {
    /// Uses an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `DATA_FILE_NAME` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DATA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListStore for FileListStore {
    fn load(&self) -> Vec<String> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                let contents = String::from_utf8_lossy(&bytes);
                if let Cow::Owned(_) = contents {
                    warn!(
                        "event=list_load module=store status=lossy path={} error_code=invalid_utf8",
                        self.path.display()
                    );
                }
                let items = parse_lines(&contents);
                info!(
                    "event=list_load module=store status=ok path={} items={}",
                    self.path.display(),
                    items.len()
                );
                items
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=list_load module=store status=missing path={}",
                    self.path.display()
                );
                Vec::new()
            }
            Err(err) => {
                error!(
                    "event=list_load module=store status=error path={} error_code=read_failed error={}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[String]) -> StoreResult<()> {
        let result = write_lines(&self.path, items);
        match &result {
            Ok(()) => info!(
                "event=list_save module=store status=ok path={} items={}",
                self.path.display(),
                items.len()
            ),
            Err(err) => error!(
                "event=list_save module=store status=error path={} error_code=write_failed error={}",
                self.path.display(),
                err
            ),
        }
        result
    }
}

/// In-memory store for embedders and tests.
///
/// `fail_saves(true)` makes every later `save` return `StoreError::Unavailable`
/// while keeping the previously saved content.
#[derive(Debug, Default)]
pub struct MemoryListStore {
    items: RefCell<Vec<String>>,
    fail_saves: Cell<bool>,
    save_count: Cell<usize>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<String>) -> Self {
        Self {
            items: RefCell::new(items),
            ..Self::default()
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Snapshot of the last successfully saved sequence.
    pub fn saved(&self) -> Vec<String> {
        self.items.borrow().clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }
}

impl ListStore for MemoryListStore {
    fn load(&self) -> Vec<String> {
        self.items.borrow().clone()
    }

    fn save(&self, items: &[String]) -> StoreResult<()> {
        if self.fail_saves.get() {
            warn!("event=list_save module=store status=error mode=memory error_code=save_disabled");
            return Err(StoreError::Unavailable("saves disabled".to_string()));
        }
        *self.items.borrow_mut() = items.to_vec();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}

/// Splits file contents into items.
///
/// Accepts `\n` and `\r\n`. A final terminator does not produce an extra
/// empty item.
pub fn parse_lines(contents: &str) -> Vec<String> {
    contents.lines().map(str::to_string).collect()
}

/// Renders items as terminated lines.
pub fn render_lines(items: &[String]) -> String {
    let capacity = items
        .iter()
        .map(|item| item.len() + LINE_ENDING.len())
        .sum();
    let mut out = String::with_capacity(capacity);
    for item in items {
        out.push_str(item);
        out.push_str(LINE_ENDING);
    }
    out
}

fn write_lines(path: &Path, items: &[String]) -> StoreResult<()> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, render_lines(items)).map_err(io_err)
}
