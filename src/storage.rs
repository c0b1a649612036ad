use sled::Db;
use tracing::debug;

use crate::error::Result;
use crate::models::User;

const USER_KEY: &str = "staylink_user";
const TOKEN_KEY: &str = "staylink_token";
const DARK_MODE_KEY: &str = "darkMode";

/// Client-side session storage on Sled.
///
/// Holds the signed-in user as JSON, the bearer token the CLI sends, and the
/// dark-mode preference flag ("true"/"false"). Nothing here is a security boundary.
#[derive(Clone)] // Sled handles are cheap to clone
pub struct SessionStore {
    db: Db,
}

impl SessionStore {
    /// Open or create the store at the given path
    pub fn open(path: &str) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    pub fn save_session(&self, user: &User, token: &str) -> Result<()> {
        let json_bytes = serde_json::to_vec(user)?;
        self.db.insert(USER_KEY, json_bytes)?;
        self.db.insert(TOKEN_KEY, token.as_bytes())?;
        self.db.flush()?;
        debug!(user_id = user.id, "session saved");
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        match self.db.get(USER_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .db
            .get(TOKEN_KEY)?
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Logout: drop user and token, keep preferences
    pub fn clear_session(&self) -> Result<()> {
        self.db.remove(USER_KEY)?;
        self.db.remove(TOKEN_KEY)?;
        self.db.flush()?;
        Ok(())
    }

    pub fn dark_mode(&self) -> Result<Option<bool>> {
        Ok(self
            .db
            .get(DARK_MODE_KEY)?
            .map(|bytes| &bytes[..] == b"true"))
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        let value: &[u8] = if enabled { b"true" } else { b"false" };
        self.db.insert(DARK_MODE_KEY, value)?;
        self.db.flush()?;
        Ok(())
    }
}
