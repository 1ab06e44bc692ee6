use gs_core::AroRequest;

/// In-memory list of ARO requests as last fetched from the service, with
/// local edits layered on top (new submissions, cancellations).
#[derive(Debug, Clone, Default)]
pub struct RequestCache {
    requests: Vec<AroRequest>,
}

impl RequestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached list with a fresh fetch.
    pub fn replace_all(&mut self, requests: Vec<AroRequest>) {
        self.requests = requests;
    }

    /// Inserts `request` at the front, dropping any stale entry with the
    /// same id.
    pub fn upsert_front(&mut self, request: AroRequest) {
        self.requests.retain(|r| r.id != request.id);
        self.requests.insert(0, request);
    }

    pub fn remove(&mut self, id: i64) -> Option<AroRequest> {
        let idx = self.requests.iter().position(|r| r.id == id)?;
        Some(self.requests.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&AroRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[AroRequest] {
        &self.requests
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
