//! Request Sequencing
//!
//! Each logical operation gets its own monotonic counter. A response is
//! applied only if its ticket is still the latest one issued for that
//! operation; responses to superseded requests are dropped.

use std::collections::HashMap;

/// Logical operations whose responses mutate view state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Train,
    Predict,
    Save,
    Dataset,
    EdaCharts,
    EvaluationCharts,
    History,
}

/// Proof that a request was issued, returned with its response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub operation: Operation,
    pub seq: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSequencer {
    latest: HashMap<Operation, u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, operation: Operation) -> Ticket {
        let seq = self.latest.entry(operation).or_insert(0);
        *seq += 1;
        tracing::debug!(?operation, seq = *seq, "Issued request");
        Ticket {
            operation,
            seq: *seq,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.operation) == Some(&ticket.seq)
    }

    /// Check a ticket, logging when its response is being dropped
    pub fn accept(&self, ticket: &Ticket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            tracing::debug!(
                operation = ?ticket.operation,
                seq = ticket.seq,
                "Discarding response to superseded request"
            );
        }
        current
    }
}
