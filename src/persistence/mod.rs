//! Best score persistence
//!
//! A single record, read once at startup and written whenever the current
//! score surpasses it. Persisted to LocalStorage on web; native builds keep
//! it in memory only.

use serde::{Deserialize, Serialize};

/// The persisted best-score record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BestScore {
    pub best: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "court_smash_best";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Whether a score beats the stored best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a new best if the score qualifies; returns true when updated.
    /// The stored value is monotonic non-decreasing.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(record) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("Loaded best score: {}", record.best);
                    return record;
                }
            }
        }

        log::info!("No stored best score, starting at 0");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved: {}", self.best);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
