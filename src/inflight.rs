/// Tracks the one chat request a view may have outstanding.
///
/// Every request gets a fresh ticket; only the reply carrying the current
/// ticket is accepted, so a superseded reply that resolves late is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InFlight {
    next: u64,
    current: Option<u64>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Issue a ticket, or `None` while another request is still outstanding.
    pub fn begin(&mut self) -> Option<u64> {
        if self.current.is_some() {
            return None;
        }
        self.next += 1;
        self.current = Some(self.next);
        Some(self.next)
    }

    /// Settle `ticket`. Returns `false` for stale tickets, which callers ignore.
    pub fn complete(&mut self, ticket: u64) -> bool {
        if self.current == Some(ticket) {
            self.current = None;
            true
        } else {
            tracing::debug!(ticket, current = ?self.current, "dropping stale reply");
            false
        }
    }
}
