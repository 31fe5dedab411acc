//! Test provider that records activations and can be told to fail or block.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use nsviews_core::ViewProvider;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("view {0} rejected")]
pub struct Rejected(pub String);

/// Views are plain names. Any view named `"bad"` is rejected.
#[derive(Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<Vec<String>>>,
    panic_once: AtomicBool,
    gate: Mutex<Option<(Sender<()>, Receiver<()>)>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next activation panics instead of returning.
    pub fn panicking_once() -> Self {
        let p = Self::default();
        p.panic_once.store(true, Ordering::SeqCst);
        p
    }

    /// The next activation signals `entered` and then waits for `release`.
    pub fn gated(entered: Sender<()>, release: Receiver<()>) -> Self {
        let p = Self::default();
        *p.gate.lock().unwrap() = Some((entered, release));
        p
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl ViewProvider for RecordingProvider {
    type View = String;
    type Error = Rejected;

    fn activate(&self, views: &[Arc<String>]) -> Result<(), Rejected> {
        self.calls
            .lock()
            .unwrap()
            .push(views.iter().map(|v| v.as_str().to_string()).collect());

        if self.panic_once.swap(false, Ordering::SeqCst) {
            panic!("provider blew up");
        }

        let gate = self.gate.lock().unwrap().take();
        if let Some((entered, release)) = gate {
            entered.send(()).unwrap();
            release.recv().unwrap();
        }

        match views.iter().find(|v| v.as_str() == "bad") {
            Some(v) => Err(Rejected(v.as_str().to_string())),
            None => Ok(()),
        }
    }
}

pub fn views(names: &[&str]) -> Vec<Arc<String>> {
    names.iter().map(|n| Arc::new(n.to_string())).collect()
}
