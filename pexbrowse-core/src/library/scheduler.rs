//! Debounce and coalescing state machine for upstream fetches.
//!
//! Pure bookkeeping: the engine feeds it triggers and completions and asks
//! it when the next fetch is due. At most one fetch is in flight; triggers
//! that arrive meanwhile collapse into a single follow-up.

use std::time::Duration;

use tokio::time::Instant;

/// Identifies one issued fetch. Tickets increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Raw ticket number, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    /// Waiting for the quiet period to elapse
    Debouncing,
    Fetching,
    /// A fetch is in flight and another is queued behind it
    FetchingWithPendingRefetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Idle,
    Debouncing { deadline: Instant },
    Fetching { ticket: FetchTicket },
    FetchingWithPendingRefetch { ticket: FetchTicket, deadline: Instant },
}

/// Outcome of [`FetchScheduler::finish`] for the in-flight ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedFetch {
    /// A follow-up fetch is now debouncing
    pub refetch_pending: bool,
}

/// Tracks when the next fetch is due and which fetch is current.
#[derive(Debug, Clone)]
pub struct FetchScheduler {
    debounce: Duration,
    slot: Slot,
    next_ticket: u64,
}

impl FetchScheduler {
    /// Idle scheduler with the given quiet period.
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            slot: Slot::Idle,
            next_ticket: 1,
        }
    }

    /// Quiet period applied after each trigger.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Where the scheduler is in its cycle.
    pub fn phase(&self) -> FetchPhase {
        match self.slot {
            Slot::Idle => FetchPhase::Idle,
            Slot::Debouncing { .. } => FetchPhase::Debouncing,
            Slot::Fetching { .. } => FetchPhase::Fetching,
            Slot::FetchingWithPendingRefetch { .. } => {
                FetchPhase::FetchingWithPendingRefetch
            }
        }
    }

    /// Record a state change at `now`, restarting the quiet period.
    pub fn trigger(&mut self, now: Instant) {
        let deadline = now + self.debounce;
        self.slot = match self.slot {
            Slot::Idle | Slot::Debouncing { .. } => Slot::Debouncing { deadline },
            Slot::Fetching { ticket }
            | Slot::FetchingWithPendingRefetch { ticket, .. } => {
                Slot::FetchingWithPendingRefetch { ticket, deadline }
            }
        };
    }

    /// When the next fetch is due. Only set while debouncing; a refetch
    /// queued behind an in-flight fetch waits for that fetch to finish.
    pub fn deadline(&self) -> Option<Instant> {
        match self.slot {
            Slot::Debouncing { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Move from debouncing to fetching, handing out a fresh ticket.
    pub fn start_fetch(&mut self) -> Option<FetchTicket> {
        match self.slot {
            Slot::Debouncing { .. } => {
                let ticket = FetchTicket(self.next_ticket);
                self.next_ticket += 1;
                self.slot = Slot::Fetching { ticket };
                Some(ticket)
            }
            _ => None,
        }
    }

    /// Settle a debounce without fetching (nothing changed upstream-wise).
    pub fn skip(&mut self) {
        if let Slot::Debouncing { .. } = self.slot {
            self.slot = Slot::Idle;
        }
    }

    /// Complete the in-flight fetch. Returns `None` for a ticket that is not
    /// the one in flight.
    pub fn finish(&mut self, ticket: FetchTicket) -> Option<FinishedFetch> {
        match self.slot {
            Slot::Fetching { ticket: current } if current == ticket => {
                self.slot = Slot::Idle;
                Some(FinishedFetch {
                    refetch_pending: false,
                })
            }
            Slot::FetchingWithPendingRefetch {
                ticket: current,
                deadline,
            } if current == ticket => {
                self.slot = Slot::Debouncing { deadline };
                Some(FinishedFetch {
                    refetch_pending: true,
                })
            }
            _ => None,
        }
    }
}
