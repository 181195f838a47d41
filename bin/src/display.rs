//! Display utilities and output formatting for the netsonde CLI.

use anyhow::Result;
use clap::ValueEnum;
use netsonde_lib::prelude::*;
use netsonde_session::ProbeRecord;

/// Output format for probe results.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
}

/// Print a probe result to stdout.
pub(crate) fn print_result(url: &str, result: &SpeedtestResult, format: Format) -> Result<()> {
    match format {
        Format::Text => {
            println!("target:      {url}");
            println!("downloaded:  {:.2} MB", result.downloaded_mb());
            println!("elapsed:     {} ms", result.elapsed_millis);
            println!("peak rate:   {:.2} MB/s", result.max_rate_mbps);
        }
        Format::Json => {
            let value = serde_json::json!({
                "url": url,
                "downloaded_bytes": result.downloaded_bytes,
                "downloaded_mb": result.downloaded_mb(),
                "elapsed_millis": result.elapsed_millis,
                "max_rate_mbps": result.max_rate_mbps,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

/// Print recorded probe runs to stdout.
pub(crate) fn print_records(records: &[ProbeRecord], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(records)?),
        Format::Text => {
            if records.is_empty() {
                println!("No recorded probe runs.");
                return Ok(());
            }
            for record in records {
                let rate = record
                    .result
                    .map_or_else(|| "-".to_string(), |r| format!("{:.2} MB/s", r.max_rate_mbps));
                println!(
                    "{}  {:9}  {:>12}  {}",
                    record.started_at.format("%Y-%m-%d %H:%M:%S"),
                    record.status.as_str(),
                    rate,
                    record.url
                );
            }
        }
    }
    Ok(())
}
