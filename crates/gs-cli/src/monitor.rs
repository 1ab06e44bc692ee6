//! Log and telemetry views, either printed once or refreshed on an interval
//! until Ctrl-C.

use chrono::Local;
use gs_client::{poll_every, GroundStationClient};
use gs_core::{AppConfig, CellValue, Column, LogEntry, Table, TelemetryRecord};

use crate::shutdown_signal;

pub(crate) fn log_table<'a>() -> Table<'a, LogEntry> {
    Table::new(vec![
        Column::new("id", "#", |e: &LogEntry| {
            CellValue::Integer(i64::try_from(e.id).unwrap_or(i64::MAX))
        }),
        Column::new("date", "Date", |e: &LogEntry| CellValue::text(e.date_label())),
        Column::new("log", "Log", |e: &LogEntry| CellValue::text(e.log.clone())),
    ])
}

pub(crate) fn telemetry_table<'a>() -> Table<'a, TelemetryRecord> {
    Table::new(vec![
        Column::new("name", "Telemetry", |t: &TelemetryRecord| {
            CellValue::text(t.display_name())
        }),
        Column::new("value", "Value", |t: &TelemetryRecord| {
            CellValue::text(t.value.clone())
        }),
        Column::new("format", "Format", |t: &TelemetryRecord| {
            CellValue::optional(t.telemetry_format.clone(), CellValue::Text)
        }),
        Column::new("created_on", "Updated", |t: &TelemetryRecord| {
            CellValue::optional(t.created_on, |ts| {
                CellValue::text(ts.format("%Y-%m-%d %H:%M:%S").to_string())
            })
        }),
    ])
}

fn print_snapshot<T>(title: &str, table: &Table<'_, T>, rows: &[T]) {
    println!("{title} @ {}", Local::now().format("%H:%M:%S"));
    if rows.is_empty() {
        println!("(none)");
    } else {
        print!("{}", table.render(rows, 0));
    }
    println!();
}

/// # Errors
///
/// Returns an error if the one-shot fetch fails. In watch mode failures are
/// logged and retried on the next tick.
pub(crate) async fn run_logs(
    client: &GroundStationClient,
    config: &AppConfig,
    watch: bool,
) -> anyhow::Result<()> {
    let table = log_table();
    if !watch {
        let logs = client.recent_logs().await?;
        print_snapshot("Recent logs", &table, &logs);
        return Ok(());
    }

    let stats = poll_every(
        config.logs_poll_interval(),
        shutdown_signal(),
        || client.recent_logs(),
        |logs: Vec<LogEntry>| print_snapshot("Recent logs", &table, &logs),
    )
    .await;
    tracing::info!(succeeded = stats.succeeded, failed = stats.failed, "log watch ended");
    Ok(())
}

/// # Errors
///
/// Returns an error if the one-shot fetch fails.
pub(crate) async fn run_telemetry(
    client: &GroundStationClient,
    config: &AppConfig,
    watch: bool,
) -> anyhow::Result<()> {
    let table = telemetry_table();
    if !watch {
        let records = client.telemetry().await?;
        print_snapshot("Telemetry", &table, &records);
        return Ok(());
    }

    let stats = poll_every(
        config.telemetry_poll_interval(),
        shutdown_signal(),
        || client.telemetry(),
        |records: Vec<TelemetryRecord>| print_snapshot("Telemetry", &table, &records),
    )
    .await;
    tracing::info!(
        succeeded = stats.succeeded,
        failed = stats.failed,
        "telemetry watch ended"
    );
    Ok(())
}
