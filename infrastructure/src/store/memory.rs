//! In-process question store.
//!
//! Holds the collection in insertion order and publishes every committed
//! state on a `watch` channel so subscribers see each change. Optionally
//! mirrors the collection to a JSON file so the board survives restarts.
//!
//! Transactions are all-or-nothing: every mutation is checked against a
//! working copy, the copy is persisted, and only then does it become the
//! current state.
//!
//! Several processes may share one snapshot file. Writers hold an
//! exclusive advisory lock on `<snapshot>.lock` while they re-read the
//! file, apply their mutations and write it back; readers take a shared
//! lock and pick up whatever the last writer committed.

use askboard_application::{QueryEvent, QuestionStore, StoreError, Subscription};
use askboard_domain::{Mutation, Question, QuestionId, QuestionRecord, Transaction, UserId};
use async_trait::async_trait;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

const SUBSCRIPTION_BUFFER: usize = 16;

pub struct MemoryQuestionStore {
    questions: Mutex<Vec<Question>>,
    updates: watch::Sender<Vec<Question>>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryQuestionStore {
    pub fn new() -> Self {
        Self::with_questions(Vec::new())
    }

    /// Start from an existing collection (kept in the given order).
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let (updates, _) = watch::channel(questions.clone());
        Self {
            questions: Mutex::new(questions),
            updates,
            snapshot_path: None,
        }
    }

    /// Open a store backed by the JSON file at `path`.
    ///
    /// A missing file starts an empty board. Entries that do not decode to
    /// a well-formed question are skipped with a warning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let questions = if path.exists() {
            load_snapshot(path)?
        } else {
            Vec::new()
        };
        debug!(count = questions.len(), path = %path.display(), "Opened question snapshot");

        let mut store = Self::with_questions(questions);
        store.snapshot_path = Some(path.to_path_buf());
        Ok(store)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Question>>, StoreError> {
        self.questions
            .lock()
            .map_err(|_| StoreError::Other("store lock poisoned".to_string()))
    }

    /// Pick up writes other processes committed to the snapshot file.
    ///
    /// Subscribers are notified only when the collection actually changed.
    fn refresh(&self) -> Result<Vec<Question>, StoreError> {
        let mut questions = self.lock()?;
        let Some(path) = &self.snapshot_path else {
            return Ok(questions.clone());
        };

        let _lock = SnapshotLock::shared(path)?;
        if path.exists() {
            let on_disk = load_snapshot(path)?;
            if on_disk != *questions {
                debug!(count = on_disk.len(), "Snapshot changed on disk");
                *questions = on_disk;
                self.updates.send_replace(questions.clone());
            }
        }
        Ok(questions.clone())
    }
}

impl Default for MemoryQuestionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn query(&self) -> Result<Vec<Question>, StoreError> {
        self.refresh()
    }

    async fn subscribe(&self) -> Result<Subscription, StoreError> {
        let mut updates = self.updates.subscribe();
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_BUFFER);

        tokio::spawn(async move {
            let initial = updates.borrow_and_update().clone();
            if tx.send(QueryEvent::Snapshot(initial)).await.is_err() {
                return;
            }
            while updates.changed().await.is_ok() {
                let snapshot = updates.borrow_and_update().clone();
                if tx.send(QueryEvent::Snapshot(snapshot)).await.is_err() {
                    break;
                }
            }
        });

        Ok(Subscription::new(rx))
    }

    async fn transact(&self, tx: Transaction) -> Result<(), StoreError> {
        if tx.is_empty() {
            return Ok(());
        }

        let mut questions = self.lock()?;
        let _lock = match &self.snapshot_path {
            Some(path) => Some(SnapshotLock::exclusive(path)?),
            None => None,
        };

        // Start from what is on disk so writes from other processes survive.
        let mut working = match &self.snapshot_path {
            Some(path) if path.exists() => load_snapshot(path)?,
            _ => questions.clone(),
        };
        for mutation in &tx.mutations {
            apply(&mut working, mutation, tx.actor_id())?;
        }

        if let Some(path) = &self.snapshot_path {
            save_snapshot(path, &working)?;
        }

        *questions = working;
        self.updates.send_replace(questions.clone());
        debug!(
            mutations = tx.mutations.len(),
            total = questions.len(),
            "Committed transaction"
        );
        Ok(())
    }

    async fn find(&self, id: &QuestionId) -> Result<Option<Question>, StoreError> {
        Ok(self.refresh()?.into_iter().find(|q| q.id() == id))
    }
}

/// Advisory lock on the file next to a snapshot; released on drop.
struct SnapshotLock {
    file: File,
}

impl SnapshotLock {
    fn exclusive(snapshot: &Path) -> Result<Self, StoreError> {
        let file = open_lock_file(snapshot)?;
        FileExt::lock_exclusive(&file).map_err(|e| lock_error(snapshot, e))?;
        Ok(Self { file })
    }

    fn shared(snapshot: &Path) -> Result<Self, StoreError> {
        let file = open_lock_file(snapshot)?;
        FileExt::lock_shared(&file).map_err(|e| lock_error(snapshot, e))?;
        Ok(Self { file })
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release snapshot lock: {}", e);
        }
    }
}

fn lock_path(snapshot: &Path) -> PathBuf {
    let mut name = snapshot.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

fn open_lock_file(snapshot: &Path) -> Result<File, StoreError> {
    ensure_parent(snapshot)?;
    let path = lock_path(snapshot);
    OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&path)
        .map_err(|e| StoreError::Other(format!("{}: {}", path.display(), e)))
}

fn lock_error(snapshot: &Path, e: std::io::Error) -> StoreError {
    StoreError::Other(format!("cannot lock {}: {}", snapshot.display(), e))
}

fn apply(
    questions: &mut Vec<Question>,
    mutation: &Mutation,
    actor: Option<&UserId>,
) -> Result<(), StoreError> {
    match mutation {
        Mutation::Create(question) => {
            if questions.iter().any(|q| q.id() == question.id()) {
                return Err(StoreError::Rejected(format!(
                    "question {} already exists",
                    question.id()
                )));
            }
            if let Some(creator) = question.creator_id()
                && actor != Some(creator)
            {
                return Err(StoreError::PermissionDenied(format!(
                    "cannot create question {} on behalf of another user",
                    question.id()
                )));
            }
            questions.push(question.clone());
        }
        Mutation::Update { id, text } => {
            let slot = questions
                .iter_mut()
                .find(|q| q.id() == id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            check_owner(slot, actor)?;
            *slot = slot.clone().with_text(text.clone());
        }
        Mutation::Delete { id } => {
            if let Some(existing) = questions.iter().find(|q| q.id() == id) {
                check_owner(existing, actor)?;
                questions.retain(|q| q.id() != id);
            }
        }
    }
    Ok(())
}

/// Records with a creator may only be changed by that creator.
fn check_owner(question: &Question, actor: Option<&UserId>) -> Result<(), StoreError> {
    match question.creator_id() {
        Some(creator) if actor != Some(creator) => Err(StoreError::PermissionDenied(format!(
            "question {} belongs to another user",
            question.id()
        ))),
        _ => Ok(()),
    }
}

fn load_snapshot(path: &Path) -> Result<Vec<Question>, StoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| StoreError::Other(format!("{}: {}", path.display(), e)))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Vec<serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| StoreError::Malformed(format!("{}: {}", path.display(), e)))?;

    let mut questions = Vec::with_capacity(entries.len());
    for entry in entries {
        let decoded = serde_json::from_value::<QuestionRecord>(entry)
            .map_err(|e| e.to_string())
            .and_then(|record| Question::try_from(record).map_err(|e| e.to_string()));
        match decoded {
            Ok(question) => questions.push(question),
            Err(reason) => warn!("Skipping malformed record in {}: {}", path.display(), reason),
        }
    }
    Ok(questions)
}

fn save_snapshot(path: &Path, questions: &[Question]) -> Result<(), StoreError> {
    let records: Vec<QuestionRecord> = questions.iter().map(QuestionRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| StoreError::Other(e.to_string()))?;

    ensure_parent(path)?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)
        .and_then(|_| std::fs::rename(&tmp, path))
        .map_err(|e| StoreError::Other(format!("{}: {}", path.display(), e)))
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| StoreError::Other(format!("{}: {}", parent.display(), e)))?;
    }
    Ok(())
}
