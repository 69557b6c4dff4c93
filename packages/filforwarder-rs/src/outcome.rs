//! Submission Result Handler
//!
//! Maps the async outcome of one contract-call submission to exactly one
//! `TransactionOutcome` and fires at most one of two caller-supplied
//! callbacks, exactly once. There is no retry: a failed submission is
//! terminal for that attempt.

use std::future::Future;

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::error::ForwardError;

/// Lifecycle of a single submission attempt
///
/// Transitions are `Pending → Confirmed` and `Pending → Failed`, both
/// terminal. Held only in caller state for the duration of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionOutcome {
    /// Submitted, not yet resolved
    Pending,
    /// The transport reported a transaction hash
    Confirmed { hash: TxHash },
    /// The transport rejected the submission
    Failed { reason: String },
}

impl TransactionOutcome {
    /// Whether this outcome can no longer change
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionOutcome::Pending)
    }
}

/// Settle a finished submission, firing exactly one callback
///
/// The callbacks are `FnOnce` and consumed here, so neither can run twice.
pub fn settle<S, E>(
    result: Result<TxHash, ForwardError>,
    on_success: S,
    on_error: E,
) -> TransactionOutcome
where
    S: FnOnce(TxHash),
    E: FnOnce(&str),
{
    match result {
        Ok(hash) => {
            on_success(hash);
            TransactionOutcome::Confirmed { hash }
        }
        Err(err) => {
            let reason = err.to_string();
            on_error(&reason);
            TransactionOutcome::Failed { reason }
        }
    }
}

/// Await a single opaque submission and settle its outcome
///
/// The future is the only asynchronous boundary; this function performs no
/// internal concurrency and supports no cancellation beyond dropping it.
pub async fn settle_submission<F, S, E>(
    submission: F,
    on_success: S,
    on_error: E,
) -> TransactionOutcome
where
    F: Future<Output = Result<TxHash, ForwardError>>,
    S: FnOnce(TxHash),
    E: FnOnce(&str),
{
    settle(submission.await, on_success, on_error)
}
