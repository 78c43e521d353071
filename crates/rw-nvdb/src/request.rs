//! Stale-response detection for viewport refreshes.
//!
//! Every refresh takes a ticket; a response is applied only if its ticket
//! is still the latest one issued.  Tickets increase monotonically and are
//! never reused.

/// Identifier of one refresh round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(pub u64);

/// Issues [`RequestTicket`]s.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new round; every ticket issued earlier becomes stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    #[inline]
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// The most recent ticket, or `None` before the first `begin`.
    pub fn latest(&self) -> Option<RequestTicket> {
        (self.latest > 0).then_some(RequestTicket(self.latest))
    }
}
