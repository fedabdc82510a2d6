//! Host connectivity signal.
//!
//! The data layer does not probe the network itself; the host
//! environment (platform APIs, or a CLI flag) reports whether the
//! device is online. [`ConnectivityMonitor`] owns the signal and
//! [`ConnectivityHandle`]s are cloned into the components that gate
//! network access on it.

use tokio::sync::watch;

/// Owner side of the connectivity signal.
///
/// Created once at startup; the host environment calls
/// [`set_online`](Self::set_online) whenever connectivity changes.
pub struct ConnectivityMonitor {
    tx: watch::Sender<bool>,
}

/// Cheap, cloneable read side of the connectivity signal.
#[derive(Debug, Clone)]
pub struct ConnectivityHandle {
    rx: watch::Receiver<bool>,
}

impl ConnectivityMonitor {
    /// Create a monitor. The initial state is online -- the signal is
    /// unknown until the host reports, and treating unknown as offline
    /// would block first fetches on startup.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(true);
        Self { tx }
    }

    /// Report a connectivity change from the host environment.
    pub fn set_online(&self, online: bool) {
        if self.tx.send_replace(online) != online {
            tracing::info!(online, "connectivity changed");
        }
    }

    /// Obtain a read handle for injection into other components.
    pub fn handle(&self) -> ConnectivityHandle {
        ConnectivityHandle {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityHandle {
    /// Whether the host currently reports no connectivity.
    pub fn is_offline(&self) -> bool {
        !*self.rx.borrow()
    }

    /// Wait until the connectivity state changes.
    ///
    /// Returns the new state, or `None` if the monitor was dropped.
    pub async fn changed(&mut self) -> Option<bool> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow())
    }
}
