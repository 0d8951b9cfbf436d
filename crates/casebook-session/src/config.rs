//! Session configuration and its persistence through the settings store.

use casebook_store::KeyValueStore;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::ChatFeatures;

/// Settings-store key under which the whole configuration is saved.
pub const SETTINGS_KEY: &str = "casebook.session_config";

/// Voice provider configuration.
///
/// Only the configuration surface lives here; talking to the provider is a
/// platform concern. Empty strings mean "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    /// Provider identifier, e.g. `"elevenlabs"`.
    pub provider: String,
    /// Provider-specific voice identifier.
    pub voice_id: String,
}

impl VoiceSettings {
    /// Whether both provider and voice have been chosen.
    pub fn is_configured(&self) -> bool {
        !self.provider.is_empty() && !self.voice_id.is_empty()
    }
}

/// Everything a session run needs to know about how it should behave.
///
/// This replaces the platform's ambient feature-toggle state: configuration
/// is constructed explicitly (from defaults or a settings store) and handed
/// to [`crate::Session::new`]. Nothing here is global.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub features: ChatFeatures,
    pub voice: VoiceSettings,
}

impl SessionConfig {
    /// Load the configuration from the settings store.
    ///
    /// A missing key yields defaults; a corrupt payload is logged and also
    /// yields defaults, so a bad write never locks the admin out. Store I/O
    /// failures still surface as errors.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let Some(payload) = store.get(SETTINGS_KEY)? else {
            tracing::debug!("No stored session configuration, using defaults");
            return Ok(Self::default());
        };
        match serde_json::from_str(&payload) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!("Stored session configuration is invalid ({e}), using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Persist the configuration to the settings store.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let payload = serde_json::to_string(self)?;
        store.put(SETTINGS_KEY, &payload)?;
        tracing::debug!("Saved session configuration");
        Ok(())
    }
}
