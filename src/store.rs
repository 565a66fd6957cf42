use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::session::Session;

const USER_ID_LEN: usize = 8;

/// `fecha_registro` as the classroom tool writes it. Files saved by earlier
/// builds of this crate used ISO timestamps, which still parse.
mod registration_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| raw.parse::<NaiveDateTime>())
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "curso")]
    pub course: String,
    #[serde(rename = "fecha_registro", with = "registration_time")]
    pub registered_at: NaiveDateTime,
}

/// A user's profile plus their session data, stored as one JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSnapshot {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(rename = "datos", default)]
    pub data: Session,
}

pub fn generate_user_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(USER_ID_LEN);
    id
}

pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{user_id}.json"))
    }

    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        course: &str,
    ) -> Result<UserSnapshot, SessionError> {
        if name.trim().is_empty() {
            return Err(SessionError::MissingField("nombre"));
        }
        if email.trim().is_empty() {
            return Err(SessionError::MissingField("email"));
        }

        // Minute precision, matching what the file can hold.
        let now = Local::now().naive_local();
        let registered_at = now
            .with_second(0)
            .and_then(|time| time.with_nanosecond(0))
            .unwrap_or(now);

        let snapshot = UserSnapshot {
            profile: UserProfile {
                user_id: generate_user_id(),
                name: name.to_string(),
                email: email.to_string(),
                course: course.to_string(),
                registered_at,
            },
            data: Session::default(),
        };
        self.save(&snapshot)?;
        Ok(snapshot)
    }

    pub fn load(&self, user_id: &str) -> Result<UserSnapshot, SessionError> {
        let path = self.path_for(user_id);
        if !path.exists() {
            return Err(SessionError::UnknownUser(user_id.to_string()));
        }

        let contents = std::fs::read_to_string(&path)?;
        let snapshot: UserSnapshot = serde_json::from_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            families = snapshot.data.families.len(),
            "session loaded"
        );
        Ok(snapshot)
    }

    /// Profiles of every saved session in the data directory, oldest first.
    /// Files that do not parse are logged and left out.
    pub fn list_users(&self) -> Result<Vec<UserProfile>, SessionError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut users = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let parsed = std::fs::read_to_string(&path)
                .map_err(SessionError::from)
                .and_then(|contents| {
                    serde_json::from_str::<UserProfile>(&contents).map_err(SessionError::from)
                });
            match parsed {
                Ok(profile) => users.push(profile),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable session file")
                }
            }
        }

        users.sort_by(|a, b| {
            a.registered_at
                .cmp(&b.registered_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(users)
    }

    pub fn save(&self, snapshot: &UserSnapshot) -> Result<(), SessionError> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(&snapshot.profile.user_id);
        let json = serde_json::to_string_pretty(snapshot)?;

        // Write to a temp file then rename so a crash never leaves half a file.
        let tmp_path = self.dir.join(format!("{}.json.tmp", snapshot.profile.user_id));
        std::fs::write(&tmp_path, json.as_bytes())?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::info!(path = %path.display(), "session saved");
        Ok(())
    }
}
