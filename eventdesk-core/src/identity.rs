//! Consumed identity surface.
//!
//! Authentication itself lives in an external collaborator; this module only
//! models what the rest of the app consumes: a reactive "current user" value.
//! Controllers read the current value at action time, and views subscribe so
//! they can re-fetch when the signed-in user changes.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The slice of the user document the event flows care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    /// Ids of the events this user created, in creation order.
    #[serde(default)]
    pub event_ids: Vec<String>,
}

impl UserProfile {
    pub fn new(uid: impl Into<String>) -> Self {
        UserProfile {
            uid: uid.into(),
            event_ids: Vec::new(),
        }
    }
}

/// Read side of the identity channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Identity {
    rx: watch::Receiver<Option<UserProfile>>,
}

impl Identity {
    /// Create a linked write/read pair, starting signed out.
    pub fn channel() -> (IdentityHandle, Identity) {
        let (tx, rx) = watch::channel(None);
        (IdentityHandle { tx }, Identity { rx })
    }

    /// The current user, or None when signed out.
    pub fn current(&self) -> Option<UserProfile> {
        self.rx.borrow().clone()
    }

    /// A receiver that yields whenever the signed-in user changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.rx.clone()
    }
}

/// Write side of the identity channel, held by whatever integrates the
/// external auth collaborator (the CLI seeds it from config).
#[derive(Debug)]
pub struct IdentityHandle {
    tx: watch::Sender<Option<UserProfile>>,
}

impl IdentityHandle {
    pub fn sign_in(&self, profile: UserProfile) {
        self.tx.send_replace(Some(profile));
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }
}
