use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one fetch. Tickets are unique for the whole process and later
/// tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Remembers the newest ticket it handed out, so a response that resolves
/// after a newer request was issued can be recognised and dropped.
///
/// Because tickets are process-wide, a response addressed to a previous
/// instance of a view (the user navigated away and back) is never mistaken
/// for one of the current instance.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    latest: Option<Ticket>,
}

impl Sequencer {
    pub fn issue(&mut self) -> Ticket {
        let ticket = Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed));
        self.latest = Some(ticket);
        ticket
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest == Some(ticket)
    }
}
