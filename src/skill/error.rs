use chrono::{DateTime, Utc};
use thiserror::Error;

use super::LifecycleEvent;
use crate::BoxedError;

/// Reasons a request is rejected before or during dispatch
///
/// Every variant is fatal to the request at hand: the library performs no
/// retries and produces no partial response alongside an error. Callers
/// decide how to surface the failure upstream.
#[derive(Debug, Error)]
pub enum SkillError {
    /// The configured application identifier is empty; identity checking
    /// cannot work without it
    #[error("configured application id is empty")]
    MissingConfiguredApplicationId,

    /// The envelope carries no application identifier
    #[error("request application id is empty")]
    MissingRequestApplicationId,

    /// The envelope was addressed to a different skill deployment
    #[error("request application id does not match the configured application id")]
    ApplicationIdMismatch,

    /// The request timestamp is not a valid RFC3339 value
    #[error("unable to parse request timestamp: {0}")]
    UnparseableTimestamp(#[from] chrono::ParseError),

    /// The request timestamp deviates too far from the current time,
    /// indicating clock skew or a replayed capture
    #[error("request timestamp {timestamp} deviates from the current time {now} by more than {tolerance_seconds} seconds")]
    TimestampOutOfTolerance {
        /// Timestamp carried by the request
        timestamp: DateTime<Utc>,
        /// Wall-clock time at validation
        now: DateTime<Utc>,
        /// Tolerance that was exceeded
        tolerance_seconds: u64,
    },

    /// A lifecycle callback returned an error; dispatch aborted immediately
    /// and no further callbacks ran
    #[error("{event} callback failed")]
    Callback {
        /// The lifecycle event whose callback failed
        event: LifecycleEvent,
        /// The error the callback returned
        #[source]
        source: BoxedError,
    },
}
