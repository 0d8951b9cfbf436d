//! Chat feature toggles managed from the admin UI.

use serde::{Deserialize, Serialize};

/// Named feature switches for a training session.
///
/// Stored payloads may predate a toggle; `#[serde(default)]` fills anything
/// missing from [`ChatFeatures::default`], so adding a toggle never
/// invalidates saved settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatFeatures {
    /// Speak the simulated patient's replies through the voice provider.
    pub voice_replies: bool,
    /// Show a running transcript next to the chat.
    pub live_transcript: bool,
    /// Side panel where the trainee keeps session notes.
    pub trainee_notes_panel: bool,
    /// Post-session debrief dialogue with the simulated supervisor.
    pub supervisor_debrief: bool,
    /// Generate the written final analysis when a session ends.
    pub final_analysis: bool,
}

impl Default for ChatFeatures {
    fn default() -> Self {
        // Voice stays off until a provider is configured; everything the
        // trainee workflow depends on is on.
        Self {
            voice_replies: false,
            live_transcript: false,
            trainee_notes_panel: true,
            supervisor_debrief: true,
            final_analysis: true,
        }
    }
}

impl ChatFeatures {
    /// Toggles as `(name, enabled)` pairs, in display order.
    pub fn entries(&self) -> [(&'static str, bool); 5] {
        [
            ("voice_replies", self.voice_replies),
            ("live_transcript", self.live_transcript),
            ("trainee_notes_panel", self.trainee_notes_panel),
            ("supervisor_debrief", self.supervisor_debrief),
            ("final_analysis", self.final_analysis),
        ]
    }
}
