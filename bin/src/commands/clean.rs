//! Clean command implementation.

use anyhow::{Context, Result};
use netsonde_session::SessionStore;

/// Remove finished records from the session store.
pub(crate) fn clean(quiet: bool) -> Result<()> {
    let store = SessionStore::with_default_path().context("failed to open session store")?;
    let cleaned = store.clean_finished().context("failed to clean records")?;

    if !quiet {
        println!("Removed {} finished record(s).", cleaned.len());
    }
    Ok(())
}
