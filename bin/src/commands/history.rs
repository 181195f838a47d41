//! History command implementation.

use anyhow::{Context, Result};
use netsonde_session::SessionStore;

use crate::display::{self, Format};

/// List recorded probe runs, newest first.
pub(crate) fn history(limit: usize, format: Format) -> Result<()> {
    let store = SessionStore::with_default_path().context("failed to open session store")?;
    let records = store.list().context("failed to list probe records")?;

    let shown = &records[..records.len().min(limit)];
    display::print_records(shown, format)
}
