use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

const DEFAULT_STATE_PATH: &str = "config/tui_state.json";

/// Small client-side memory: the last event opened per backend, so a restart
/// lands where the user left off.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalState {
    pub recents: Vec<RecentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentEntry {
    pub base_url: String,
    pub event_id: Uuid,
}

impl LocalState {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    pub fn last_event_for(&self, base_url: &str) -> Option<Uuid> {
        self.recents
            .iter()
            .find(|entry| entry.base_url == base_url)
            .map(|entry| entry.event_id)
    }

    pub fn set_last_event(&mut self, base_url: &str, event_id: Uuid) {
        if let Some(entry) = self
            .recents
            .iter_mut()
            .find(|entry| entry.base_url == base_url)
        {
            entry.event_id = event_id;
            return;
        }

        self.recents.push(RecentEntry {
            base_url: base_url.to_string(),
            event_id,
        });
    }
}

pub fn default_state_path() -> &'static str {
    DEFAULT_STATE_PATH
}
