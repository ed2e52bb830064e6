//! View controllers.
//!
//! Each controller owns a [`CatalogStore`](crate::store::CatalogStore)
//! handle and the working state behind one view: user interaction mutates
//! the state, the controller issues a store call, and the response
//! rehydrates the state for the next render. Service failures never escape
//! as panics; they become user-facing error state, and nothing is retried
//! automatically.
//!
//! List refreshes are sequenced. Rapid interaction (fast filter toggling,
//! tab clicking) can make responses arrive out of order, so each refresh is
//! issued as a [`QueryTicket`] with a monotonically increasing sequence
//! number, and results older than the newest one applied are discarded.

mod browse;
mod detail;
mod moderate;
mod submit;

pub use browse::ProjectBrowser;
pub use detail::{DetailView, ProjectDetail};
pub use moderate::{ModerationDesk, StatusFilter};
pub use submit::{SubmissionForm, SubmitError, ValidationError, PLACEHOLDER_IMAGE_URL};

use crate::store::ProjectQuery;

/// Handle for one in-flight list refresh.
///
/// Created by a controller's `begin_refresh`, resolved by running the
/// carried query against the store, and handed back to `apply`.
#[derive(Debug)]
pub struct QueryTicket {
    seq: u64,
    query: ProjectQuery,
}

impl QueryTicket {
    /// The query snapshot taken when this refresh was issued.
    pub fn query(&self) -> &ProjectQuery {
        &self.query
    }
}

/// Monotonic sequence guard dropping out-of-order refresh results.
#[derive(Debug, Default)]
struct Sequencer {
    issued: u64,
    applied: u64,
}

impl Sequencer {
    fn issue(&mut self, query: ProjectQuery) -> QueryTicket {
        self.issued += 1;
        QueryTicket {
            seq: self.issued,
            query,
        }
    }

    /// Admit `ticket` unless something newer was already applied.
    fn admit(&mut self, ticket: &QueryTicket) -> bool {
        if ticket.seq <= self.applied {
            return false;
        }
        self.applied = ticket.seq;
        true
    }

    /// Whether `ticket` is the newest refresh issued so far.
    fn is_latest(&self, ticket: &QueryTicket) -> bool {
        ticket.seq == self.issued
    }
}
