//! `requests` command handlers: list, submit, cancel.

use chrono::Utc;
use clap::Subcommand;
use gs_client::{cancel_request, submit_request, CancelMode, GroundStationClient, RequestCache};
use gs_core::{AppConfig, AroRequest, AroRequestStatus, CellValue, Column, SortDirection, Table};

/// Sub-commands available under `requests`.
#[derive(Debug, Subcommand)]
pub enum RequestsCommands {
    /// List imaging requests
    List {
        /// Only show requests in this status (repeatable)
        #[arg(long = "status")]
        statuses: Vec<AroRequestStatus>,
        /// Number of requests to fetch (defaults to GS_REQUEST_LIST_COUNT)
        #[arg(long)]
        count: Option<i64>,
        /// Number of requests to skip on the server
        #[arg(long, default_value = "0")]
        offset: i64,
        /// Column to sort by (id or header)
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Per-column substring filter, e.g. `status=pend` (repeatable)
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
        /// Substring matched against every column
        #[arg(long)]
        search: Option<String>,
        /// Rows per page
        #[arg(long)]
        page_size: Option<usize>,
        /// One-based page to show
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Submit a new imaging request
    Submit {
        /// Latitude in decimal degrees (-90 to 90)
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        /// Longitude in decimal degrees (-180 to 180)
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Cancel a pending request
    Cancel { id: i64 },
}

/// Parses a `COLUMN=TEXT` filter argument.
pub(crate) fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (column, needle) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=TEXT, got \"{raw}\""))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in \"{raw}\""));
    }
    Ok((column.to_string(), needle.to_string()))
}

pub(crate) fn request_table<'a>() -> Table<'a, AroRequest> {
    Table::new(vec![
        Column::new("id", "ID", |r: &AroRequest| CellValue::Integer(r.id)),
        Column::new("latitude", "Latitude", |r: &AroRequest| {
            CellValue::Number(r.latitude)
        })
        .with_precision(6),
        Column::new("longitude", "Longitude", |r: &AroRequest| {
            CellValue::Number(r.longitude)
        })
        .with_precision(6),
        Column::new("status", "Status", |r: &AroRequest| {
            CellValue::text(r.status.label())
        }),
        Column::new("created_on", "Created", |r: &AroRequest| {
            CellValue::text(r.created_on.format("%Y-%m-%d %H:%M").to_string())
        }),
        Column::new("pic_taken_on", "Taken", |r: &AroRequest| {
            CellValue::optional(r.pic_taken_on, |t| {
                CellValue::text(t.format("%Y-%m-%d %H:%M").to_string())
            })
        }),
        Column::new("packet_id", "Packet", |r: &AroRequest| {
            CellValue::optional(r.packet_id, CellValue::Integer)
        }),
    ])
}

/// Dispatches a `requests` sub-command.
///
/// # Errors
///
/// Returns an error if the service call fails, a coordinate is invalid, or
/// a table option names an unknown column.
pub(crate) async fn run(
    client: &GroundStationClient,
    config: &AppConfig,
    command: RequestsCommands,
) -> anyhow::Result<()> {
    match command {
        RequestsCommands::List {
            statuses,
            count,
            offset,
            sort,
            desc,
            filters,
            search,
            page_size,
            page,
        } => {
            let query = gs_client::RequestQuery {
                count: count.unwrap_or(config.request_list_count),
                offset,
                statuses,
            };
            let requests = client.list_aro_requests(&query).await?;

            let mut table = request_table();
            if let Some(column) = sort.as_deref() {
                let direction = if desc {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                table.set_sort(column, Some(direction))?;
            }
            for (column, needle) in &filters {
                table.set_filter(column, needle)?;
            }
            if let Some(needle) = search.as_deref() {
                table.set_global_filter(needle);
            }
            table.set_page_size(page_size)?;

            print_page(&table, &requests, page);
            Ok(())
        }
        RequestsCommands::Submit {
            latitude,
            longitude,
        } => {
            let mut cache = fetch_cache(client, config).await?;
            let created =
                submit_request(client, &mut cache, latitude, longitude, config.aro_id).await?;
            println!(
                "submitted request {} at {} ({})",
                created.id,
                created.coordinate(),
                created.status.label()
            );
            print_page(&request_table(), cache.as_slice(), 1);
            Ok(())
        }
        RequestsCommands::Cancel { id } => {
            let mut cache = fetch_cache(client, config).await?;
            let removed =
                cancel_request(client, &mut cache, id, Utc::now(), CancelMode::Remote).await?;
            println!("cancelled request {}", removed.id);
            print_page(&request_table(), cache.as_slice(), 1);
            Ok(())
        }
    }
}

/// Loads the most recent requests so submissions and cancellations can be
/// shown against the current listing.
async fn fetch_cache(
    client: &GroundStationClient,
    config: &AppConfig,
) -> anyhow::Result<RequestCache> {
    let query = gs_client::RequestQuery {
        count: config.request_list_count,
        ..Default::default()
    };
    let mut cache = RequestCache::new();
    cache.replace_all(client.list_aro_requests(&query).await?);
    Ok(cache)
}

/// Prints one page (one-based) of `rows` with a footer.
fn print_page(table: &Table<'_, AroRequest>, rows: &[AroRequest], page: usize) {
    let total = table.rows(rows).len();
    if total == 0 {
        println!("no requests found");
        return;
    }

    let pages = table.page_count(rows);
    let index = page.saturating_sub(1);
    print!("{}", table.render(rows, index));
    if index >= pages {
        eprintln!("warning: page {page} is past the last page ({pages})");
    }
    println!("{total} request(s), page {} of {pages}", page.max(1));
}
