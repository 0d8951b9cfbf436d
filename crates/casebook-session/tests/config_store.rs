//! Session configuration persisted through the file-backed settings store.

use casebook_session::{SETTINGS_KEY, SessionConfig};
use casebook_store::{JsonFileKv, KeyValueStore};
use tempfile::tempdir;

#[test]
fn config_round_trips_through_a_settings_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    {
        let mut kv = JsonFileKv::open(&path).unwrap();
        let mut config = SessionConfig::default();
        config.features.voice_replies = true;
        config.features.live_transcript = true;
        config.voice.provider = "elevenlabs".to_string();
        config.voice.voice_id = "amelia".to_string();
        config.save(&mut kv).unwrap();
    }

    let kv = JsonFileKv::open(&path).unwrap();
    let loaded = SessionConfig::load(&kv).unwrap();
    assert!(loaded.features.voice_replies);
    assert!(loaded.features.live_transcript);
    assert_eq!(loaded.voice.provider, "elevenlabs");
}

#[test]
fn corrupt_stored_payload_degrades_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut kv = JsonFileKv::open(&path).unwrap();
    kv.put(SETTINGS_KEY, "{\"features\": 42}").unwrap();

    // The store itself is fine, the payload is not: load keeps working.
    let loaded = SessionConfig::load(&kv).unwrap();
    assert_eq!(loaded, SessionConfig::default());
}
