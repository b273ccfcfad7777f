use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::constants::{REFRESH_TOKEN_KEY, SESSION_FILE, TOKEN_KEY};
use crate::error::{SpinwheelError, SpinwheelResult};
use crate::logging::log_warn;

/// The pair of persisted tokens representing a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

/// Key-value storage for session tokens.
///
/// Implementations use interior mutability so a single store can be shared
/// behind an `Arc` by the client and the auth context.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> SpinwheelResult<()>;
    fn remove(&self, key: &str) -> SpinwheelResult<()>;

    /// Removes both session keys.
    fn clear(&self) -> SpinwheelResult<()> {
        self.remove(TOKEN_KEY)?;
        self.remove(REFRESH_TOKEN_KEY)
    }

    fn access_token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get(REFRESH_TOKEN_KEY)
    }

    fn load_session(&self) -> Option<Session> {
        Some(Session {
            access_token: self.access_token()?,
            refresh_token: self.refresh_token()?,
        })
    }

    fn save_session(&self, session: &Session) -> SpinwheelResult<()> {
        self.set(TOKEN_KEY, &session.access_token)?;
        self.set(REFRESH_TOKEN_KEY, &session.refresh_token)
    }
}

fn lock_entries(entries: &Mutex<HashMap<String, String>>) -> MutexGuard<'_, HashMap<String, String>> {
    // A poisoned map is still a valid map
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Self {
        let store = Self::new();
        {
            let mut entries = lock_entries(&store.entries);
            entries.insert(TOKEN_KEY.to_string(), session.access_token.clone());
            entries.insert(REFRESH_TOKEN_KEY.to_string(), session.refresh_token.clone());
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        lock_entries(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> SpinwheelResult<()> {
        lock_entries(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SpinwheelResult<()> {
        lock_entries(&self.entries).remove(key);
        Ok(())
    }
}

/// Session tokens persisted as a flat JSON object on disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log_warn(&format!("Ignoring corrupt session file {}: {}", path.display(), e));
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Opens the store in the user's home directory.
    pub fn open_default() -> SpinwheelResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| SpinwheelError::Config("Could not find home directory".to_string()))?;
        Ok(Self::open(home.join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> SpinwheelResult<()> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> SpinwheelResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> SpinwheelResult<()> {
    Ok(())
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        lock_entries(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> SpinwheelResult<()> {
        let mut entries = lock_entries(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> SpinwheelResult<()> {
        let mut entries = lock_entries(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
