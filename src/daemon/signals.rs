//! Process signal wiring: SIGINT/SIGTERM fan into the runner's shutdown
//! channel.

use crossbeam_channel::Sender;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

use crate::core::errors::{Result, WatchError};
use crate::daemon::Shutdown;

/// Spawn the listener thread. The first termination signal sends one
/// [`Shutdown`] and the thread exits; a second signal falls through to the
/// process default.
pub fn spawn_listener(tx: Sender<Shutdown>) -> Result<()> {
    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(|err| WatchError::Runtime {
        details: format!("signal registration failed: {err}"),
    })?;
    std::thread::spawn(move || {
        if signals.forever().next().is_some() {
            let _ = tx.send(Shutdown);
        }
    });
    Ok(())
}
