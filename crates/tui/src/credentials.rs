use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The (server, auth, secret) triple needed to authorize a request.
/// Every field may be absent; `resolve` never substitutes defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub server: Option<String>,
    pub auth: Option<String>,
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Server,
    Auth,
    Secret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Lives for the process only; the active session always wins.
    Session,
    /// JSON file on disk, the remembered default across sessions.
    Persistent,
}

/// One storage tier. The on-disk shape of the persistent tier uses exactly
/// the keys `auth`, `server`, `secret`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Tier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secret: Option<String>,
}

impl Tier {
    fn get(&self, field: CredentialField) -> Option<&str> {
        match field {
            CredentialField::Server => self.server.as_deref(),
            CredentialField::Auth => self.auth.as_deref(),
            CredentialField::Secret => self.secret.as_deref(),
        }
    }

    fn set(&mut self, field: CredentialField, value: String) {
        match field {
            CredentialField::Server => self.server = Some(value),
            CredentialField::Auth => self.auth = Some(value),
            CredentialField::Secret => self.secret = Some(value),
        }
    }
}

/// Two-tier credential store. Session scope shadows persistent scope
/// field by field; persistent writes flush to the JSON file synchronously,
/// so a later `resolve` in the same event-loop turn observes them.
#[derive(Debug)]
pub struct CredentialStore {
    session: Tier,
    persistent: Tier,
    path: String,
}

impl CredentialStore {
    pub fn load(path: &str) -> Result<Self> {
        let persistent = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Tier::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            session: Tier::default(),
            persistent,
            path: path.to_string(),
        })
    }

    /// Seeds the persistent `server` key from configuration on first run.
    /// A stored value is never overridden.
    pub fn seed_server(&mut self, server: &str) -> Result<()> {
        if self.persistent.server.is_some() {
            return Ok(());
        }
        self.persist(CredentialField::Server, server, Scope::Persistent)
    }

    /// Per field: session scope first, then persistent, else absent.
    pub fn resolve(&self) -> Credential {
        let field = |field: CredentialField| {
            self.session
                .get(field)
                .or_else(|| self.persistent.get(field))
                .map(str::to_string)
        };
        Credential {
            server: field(CredentialField::Server),
            auth: field(CredentialField::Auth),
            secret: field(CredentialField::Secret),
        }
    }

    /// Writes one field in one scope; the other scope is untouched.
    pub fn persist(&mut self, field: CredentialField, value: &str, scope: Scope) -> Result<()> {
        match scope {
            Scope::Session => {
                self.session.set(field, value.to_string());
                Ok(())
            }
            Scope::Persistent => {
                self.persistent.set(field, value.to_string());
                self.save()
            }
        }
    }

    /// Drops every session-scope field (logout).
    pub fn clear_session(&mut self) {
        self.session = Tier::default();
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(&self.persistent)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_at(dir: &tempfile::TempDir) -> CredentialStore {
        let path = dir.path().join("credentials.json");
        CredentialStore::load(path.to_str().expect("utf-8 temp path")).expect("load empty store")
    }

    #[test]
    fn missing_file_resolves_to_absent_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_at(&dir);
        assert_eq!(store.resolve(), Credential::default());
    }

    #[test]
    fn session_scope_wins_over_persistent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_at(&dir);

        store
            .persist(CredentialField::Server, "http://stored:9090", Scope::Persistent)
            .expect("persist");
        store
            .persist(CredentialField::Server, "http://active:9090", Scope::Session)
            .expect("persist");

        assert_eq!(store.resolve().server.as_deref(), Some("http://active:9090"));
    }

    #[test]
    fn persistent_scope_is_the_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_at(&dir);

        store
            .persist(CredentialField::Auth, "token-1", Scope::Persistent)
            .expect("persist");

        assert_eq!(store.resolve().auth.as_deref(), Some("token-1"));
        assert!(store.resolve().secret.is_none());
    }

    #[test]
    fn precedence_is_per_field() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_at(&dir);

        store
            .persist(CredentialField::Server, "http://stored:9090", Scope::Persistent)
            .expect("persist");
        store
            .persist(CredentialField::Secret, "hunter2", Scope::Session)
            .expect("persist");

        let resolved = store.resolve();
        assert_eq!(resolved.server.as_deref(), Some("http://stored:9090"));
        assert_eq!(resolved.secret.as_deref(), Some("hunter2"));
        assert!(resolved.auth.is_none());
    }

    #[test]
    fn session_write_leaves_persistent_tier_on_disk_unchanged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("credentials.json");
        let path = path.to_str().expect("utf-8 temp path");

        let mut store = CredentialStore::load(path).expect("load");
        store
            .persist(CredentialField::Secret, "remembered", Scope::Persistent)
            .expect("persist");
        store
            .persist(CredentialField::Secret, "candidate", Scope::Session)
            .expect("persist");

        // A fresh load sees only the persistent tier.
        let reloaded = CredentialStore::load(path).expect("reload");
        assert_eq!(reloaded.resolve().secret.as_deref(), Some("remembered"));
    }

    #[test]
    fn clear_session_restores_persistent_values() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_at(&dir);

        store
            .persist(CredentialField::Auth, "stored-token", Scope::Persistent)
            .expect("persist");
        store
            .persist(CredentialField::Auth, "session-token", Scope::Session)
            .expect("persist");
        store.clear_session();

        assert_eq!(store.resolve().auth.as_deref(), Some("stored-token"));
    }

    #[test]
    fn seed_server_never_overrides_a_stored_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_at(&dir);

        store.seed_server("http://first:9090").expect("seed");
        store.seed_server("http://second:9090").expect("seed");

        assert_eq!(store.resolve().server.as_deref(), Some("http://first:9090"));
    }
}
