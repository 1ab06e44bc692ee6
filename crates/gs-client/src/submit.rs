//! Request submission and cancellation against the local cache.
//!
//! Validation always runs before any network call. The cache is only
//! touched after the service confirms, so a failed call leaves it as it
//! was.

use chrono::{DateTime, Utc};
use gs_core::{Coordinate, NewAroRequest};

use crate::cache::RequestCache;
use crate::client::GroundStationClient;
use crate::error::ClientError;

/// How a cancellation is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelMode {
    /// Ask the service first, then drop the entry locally.
    Remote,
    /// Drop the entry from the local cache only.
    LocalOnly,
}

/// Validates the coordinate, persists it, and puts the created request at
/// the front of `cache`.
///
/// # Errors
///
/// - [`ClientError::InvalidCoordinate`] when the coordinate is out of range
///   or NaN; no request is sent.
/// - Any error from [`GroundStationClient::create_aro_request`].
pub async fn submit_request(
    client: &GroundStationClient,
    cache: &mut RequestCache,
    latitude: f64,
    longitude: f64,
    aro_id: Option<i64>,
) -> Result<gs_core::AroRequest, ClientError> {
    let coordinate = Coordinate::new(latitude, longitude).inspect_err(|e| {
        tracing::warn!(latitude, longitude, error = %e, "rejected request submission");
    })?;

    let created = client
        .create_aro_request(&NewAroRequest::new(coordinate, aro_id))
        .await?;
    tracing::info!(id = created.id, %coordinate, "ARO request submitted");

    cache.upsert_front(created.clone());
    Ok(created)
}

/// Cancels a cached request.
///
/// The request must be in `cache` and cancellable at `now` (past its
/// `cancellable_after` and not already terminal).
///
/// # Errors
///
/// - [`ClientError::UnknownRequest`] if `id` is not cached.
/// - [`ClientError::NotCancellable`] if the request cannot be cancelled yet.
/// - Any error from [`GroundStationClient::cancel_aro_request`] in
///   [`CancelMode::Remote`].
pub async fn cancel_request(
    client: &GroundStationClient,
    cache: &mut RequestCache,
    id: i64,
    now: DateTime<Utc>,
    mode: CancelMode,
) -> Result<gs_core::AroRequest, ClientError> {
    let request = cache.get(id).ok_or(ClientError::UnknownRequest(id))?;

    if !request.is_cancellable_at(now) {
        let reason = if request.status.is_terminal() {
            format!("request is already {}", request.status)
        } else {
            match request.cancellable_after {
                Some(after) => format!("cancellable after {}", after.format("%Y-%m-%d %H:%M:%S UTC")),
                None => "cancellation not permitted".to_string(),
            }
        };
        return Err(ClientError::NotCancellable { id, reason });
    }

    if mode == CancelMode::Remote {
        client.cancel_aro_request(id).await?;
    }

    let removed = cache.remove(id).ok_or(ClientError::UnknownRequest(id))?;
    tracing::info!(id, ?mode, "ARO request cancelled");
    Ok(removed)
}
