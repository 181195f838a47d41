//! Run command implementation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use netsonde_lib::prelude::*;
use netsonde_session::{ProbeRecord, SessionStore, file_slug};

use crate::display::{self, Format};

/// Probe download throughput for a single target.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run(
    raw_url: &str,
    max_duration: u64,
    read_timeout: Option<u64>,
    format: Format,
    save: bool,
    output_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let url = normalize(raw_url).context("failed to normalize probe target")?;

    let client = ProbeClient::with_defaults().context("failed to build HTTP client")?;
    let config = ProbeConfig {
        max_duration: Duration::from_secs(max_duration),
        read_timeout: read_timeout.map(Duration::from_secs),
    };
    let probe = SpeedProbe::new(client, config);

    // Ctrl-C cancels cooperatively at the next chunk boundary.
    let cancel = CancelFlag::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] probing {msg}")
                .expect("Invalid progress template"),
        );
        pb.set_message(url.clone());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let record = save.then(|| ProbeRecord::new(&url));
    let outcome = probe.run_cancellable(&url, &cancel).await;
    spinner.finish_and_clear();

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            if let Some(mut record) = record {
                record.mark_failed(e.to_string());
                persist(&record, quiet)?;
            }
            return Err(e).context("probe failed");
        }
    };

    display::print_result(&url, &result, format)?;

    if let Some(mut record) = record {
        record.mark_completed(result);
        persist(&record, quiet)?;
    }

    if let Some(dir) = output_dir {
        let path = dir.join(format!("{}.json", file_slug(&url)));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
        std::fs::write(&path, serde_json::to_string_pretty(&result)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        if !quiet {
            println!("Result written to: {}", path.display());
        }
    }

    Ok(())
}

/// Saves a record to the default session store.
fn persist(record: &ProbeRecord, quiet: bool) -> Result<()> {
    let store = SessionStore::with_default_path().context("failed to open session store")?;
    store.save(record).context("failed to save probe record")?;
    if !quiet {
        println!("Recorded session: {}", record.id);
    }
    Ok(())
}
