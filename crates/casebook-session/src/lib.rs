//! Session configuration and construction for training runs.
//!
//! The platform's feature toggles become an explicit [`SessionConfig`] here:
//! loaded from an injected [`casebook_store::KeyValueStore`], handed to
//! [`Session::new`], never held in ambient state.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod features;
pub mod session;

pub use config::{SETTINGS_KEY, SessionConfig, VoiceSettings};
pub use error::{Result, SessionError};
pub use features::ChatFeatures;
pub use session::Session;
