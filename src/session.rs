//! Session storage and mock authentication.
//!
//! The store is a small key/value JSON file (`store.json`) in the data
//! directory. The session lives under a single well-known key, so the file
//! can hold other records without the session code knowing about them.
//!
//! Authentication is local only: signing in or up never talks to a server.
//! It checks that every field is present and records the user.

use crate::types::Session;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Key the session record is stored under.
pub const SESSION_KEY: &str = "@CardCreator:user";

const STORE_FILENAME: &str = "store.json";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Store is not a JSON object: {}", .0.display())]
    NotAnObject(PathBuf),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Authentication failed. Please check your credentials.")]
    Store(#[source] SessionError),
    #[error("Registration failed. Please try again.")]
    Registration(#[source] SessionError),
}

/// Persists the single signed-in user.
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError>;
    fn save(&self, session: &Session) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// JSON key/value file in a data directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STORE_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(SessionError::NotAnObject(self.path.clone())),
        }
    }

    fn write_map(&self, map: Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let mut map = self.read_map()?;
        match map.remove(SESSION_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let mut map = self.read_map()?;
        map.insert(SESSION_KEY.to_string(), serde_json::to_value(session)?);
        self.write_map(map)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut map = self.read_map()?;
        if map.remove(SESSION_KEY).is_some() {
            self.write_map(map)?;
        }
        Ok(())
    }
}

/// In-process store with nothing on disk.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.session.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.session.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Mock authentication over a session store.
///
/// Holds the current user explicitly; nothing is global.
pub struct Auth<S: SessionStore> {
    store: S,
    user: Option<Session>,
}

impl<S: SessionStore> Auth<S> {
    /// Load the stored session. A store that cannot be read is logged and
    /// treated as signed out.
    pub fn restore(store: S) -> Self {
        let user = match store.load() {
            Ok(user) => user,
            Err(e) => {
                log::error!("could not load stored session: {e}");
                None
            }
        };
        Self { store, user }
    }

    pub fn user(&self) -> Option<&Session> {
        self.user.as_ref()
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<&Session, AuthError> {
        require_fields(&[email, password])?;
        self.record(Session {
            id: "1".to_string(),
            email: email.to_string(),
            name: "User".to_string(),
        })
        .map_err(AuthError::Store)
    }

    /// Register a user. The password must be typed twice.
    pub fn sign_up(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<&Session, AuthError> {
        require_fields(&[name, email, password, confirm_password])?;
        if password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        self.record(Session {
            id: "1".to_string(),
            email: email.to_string(),
            name: name.to_string(),
        })
        .map_err(AuthError::Registration)
    }

    pub fn sign_out(&mut self) -> Result<(), AuthError> {
        self.store.clear().map_err(AuthError::Store)?;
        self.user = None;
        Ok(())
    }

    fn record(&mut self, session: Session) -> Result<&Session, SessionError> {
        self.store.save(&session)?;
        log::debug!("session recorded for {}", session.email);
        Ok(&*self.user.insert(session))
    }
}

fn require_fields(fields: &[&str]) -> Result<(), AuthError> {
    if fields.iter().any(|f| f.is_empty()) {
        return Err(AuthError::MissingFields);
    }
    Ok(())
}
