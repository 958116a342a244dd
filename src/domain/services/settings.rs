#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::RwLock;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Live view of the user-facing settings. Loaded once at startup and only
/// ever mutated by explicit user action; the consent flag is read on every
/// request so a toggle applies to the very next one. Persistence of a
/// mutation is the caller's business, this type is purely in-memory.
pub struct SettingsStore {
    allow_send_to_server: AtomicBool,
    server_url: RwLock<String>,
}

impl SettingsStore {
    pub fn new(allow_send_to_server: bool, server_url: &str) -> SettingsStore {
        return SettingsStore {
            allow_send_to_server: AtomicBool::new(allow_send_to_server),
            server_url: RwLock::new(server_url.to_string()),
        };
    }

    pub fn from_config() -> SettingsStore {
        return SettingsStore::new(
            Config::get(ConfigKey::AllowSendToServer) == "true",
            &Config::get(ConfigKey::ServerUrl),
        );
    }

    pub fn allow_send_to_server(&self) -> bool {
        return self.allow_send_to_server.load(Ordering::Relaxed);
    }

    pub fn server_url(&self) -> String {
        return self.server_url.read().unwrap().to_string();
    }

    pub fn apply(&self, allow_send_to_server: Option<bool>, server_url: Option<String>) {
        if let Some(allow) = allow_send_to_server {
            self.allow_send_to_server.store(allow, Ordering::Relaxed);
        }

        if let Some(url) = server_url {
            *self.server_url.write().unwrap() = url;
        }
    }
}
