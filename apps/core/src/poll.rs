use std::time::Duration;

/// Period of the free-running poll timer.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Deadline for one request, body included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(2000);

/// Handle for one issued request.
///
/// Completions are matched back to the gate through the ticket, so a
/// response that arrives after its endpoint was replaced, or after a newer
/// response was applied, can be told apart and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTicket {
    generation: u64,
    epoch: u64,
    url: String,
}

impl PollTicket {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Current,
    Stale,
}

/// Sequencing for requests: one in flight at a time, newest result wins.
#[derive(Debug, Default, Clone)]
pub struct PollGate {
    next_generation: u64,
    last_applied: Option<u64>,
    in_flight: Option<u64>,
    epoch: u64,
}

impl PollGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for `url`, or `None` while a request is outstanding.
    pub fn begin(&mut self, url: String) -> Option<PollTicket> {
        if let Some(generation) = self.in_flight {
            log::debug!("skipping tick, request #{generation} still in flight");
            return None;
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        self.in_flight = Some(generation);

        Some(PollTicket {
            generation,
            epoch: self.epoch,
            url,
        })
    }

    /// Releases the in-flight slot held by `ticket` and classifies it.
    pub fn finish(&mut self, ticket: &PollTicket) -> Freshness {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }

        if ticket.epoch != self.epoch {
            return Freshness::Stale;
        }

        if self
            .last_applied
            .is_some_and(|applied| ticket.generation <= applied)
        {
            return Freshness::Stale;
        }

        self.last_applied = Some(ticket.generation);
        Freshness::Current
    }

    /// Starts a new epoch. Requests from earlier epochs become stale and no
    /// longer block new ticks.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.in_flight = None;
    }

    pub const fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}
