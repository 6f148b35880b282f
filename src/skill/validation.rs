//! Request validation checks run ahead of dispatch
//!
//! Two independent checks, each returning a descriptive error on failure.
//! The dispatcher runs them in order and short-circuits on the first
//! failure; either can be disabled through the [`Skill`](super::Skill)
//! configuration.

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::error::SkillError;
use crate::domain::{Request, RequestEnvelope};

/// Verifies that the envelope is addressed to this skill deployment
///
/// A single deployed function may be invoked by the infrastructure of
/// several logical skills; this exact, case-sensitive match is the one piece
/// of authorization the library performs.
pub fn verify_application_id(
    envelope: &RequestEnvelope,
    configured_id: &str,
) -> Result<(), SkillError> {
    let request_id = &envelope.session.application.application_id;

    if configured_id.is_empty() {
        return Err(SkillError::MissingConfiguredApplicationId);
    }
    if request_id.is_empty() {
        return Err(SkillError::MissingRequestApplicationId);
    }
    if request_id != configured_id {
        return Err(SkillError::ApplicationIdMismatch);
    }

    Ok(())
}

/// Verifies that the request timestamp is fresh
///
/// Parses the timestamp as RFC3339 and compares it against the current wall
/// clock. A deviation of exactly the tolerance passes; anything beyond it,
/// in either direction, is rejected as a replayed or skewed request.
pub fn verify_timestamp(request: &Request, tolerance: Duration) -> Result<(), SkillError> {
    let timestamp = DateTime::parse_from_rfc3339(&request.timestamp)?.with_timezone(&Utc);
    let now = Utc::now();

    let deviation_ms = (now - timestamp).num_milliseconds().unsigned_abs();
    if u128::from(deviation_ms) > tolerance.as_millis() {
        return Err(SkillError::TimestampOutOfTolerance {
            timestamp,
            now,
            tolerance_seconds: tolerance.as_secs(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod does {
    use super::*;
    use crate::constants::DEFAULT_TIMESTAMP_TOLERANCE;
    use crate::domain::{ApplicationReference, Session};

    fn envelope_with_application_id(id: &str) -> RequestEnvelope {
        RequestEnvelope {
            version: "1.0".into(),
            session: Session {
                application: ApplicationReference {
                    application_id: id.into(),
                },
                ..Default::default()
            },
            request: Request::default(),
            context: None,
        }
    }

    fn request_with_offset(offset: chrono::Duration) -> Request {
        Request {
            timestamp: (Utc::now() + offset).to_rfc3339(),
            ..Default::default()
        }
    }

    #[test]
    fn accept_a_matching_application_id() {
        let envelope = envelope_with_application_id("application-123");
        assert!(verify_application_id(&envelope, "application-123").is_ok());
    }

    #[test]
    fn reject_a_mismatched_application_id() {
        let envelope = envelope_with_application_id("application-123");
        let error = verify_application_id(&envelope, "application-456").unwrap_err();
        assert!(matches!(error, SkillError::ApplicationIdMismatch));
    }

    #[test]
    fn reject_an_empty_configured_application_id() {
        let envelope = envelope_with_application_id("application-123");
        let error = verify_application_id(&envelope, "").unwrap_err();
        assert!(matches!(error, SkillError::MissingConfiguredApplicationId));
    }

    #[test]
    fn reject_an_empty_request_application_id() {
        let envelope = envelope_with_application_id("");
        let error = verify_application_id(&envelope, "application-123").unwrap_err();
        assert!(matches!(error, SkillError::MissingRequestApplicationId));
    }

    #[test]
    fn accept_a_timestamp_within_the_tolerance() {
        let request = request_with_offset(chrono::Duration::seconds(-145));
        assert!(verify_timestamp(&request, DEFAULT_TIMESTAMP_TOLERANCE).is_ok());
    }

    #[test]
    fn reject_a_stale_timestamp() {
        let request = request_with_offset(chrono::Duration::seconds(-151));
        let error = verify_timestamp(&request, DEFAULT_TIMESTAMP_TOLERANCE).unwrap_err();
        assert!(matches!(error, SkillError::TimestampOutOfTolerance { .. }));
    }

    #[test]
    fn reject_a_timestamp_from_the_future() {
        let request = request_with_offset(chrono::Duration::seconds(151));
        let error = verify_timestamp(&request, DEFAULT_TIMESTAMP_TOLERANCE).unwrap_err();
        assert!(matches!(error, SkillError::TimestampOutOfTolerance { .. }));
    }

    #[test]
    fn reject_an_unparseable_timestamp() {
        let request = Request {
            timestamp: "UNPARSEABLE".into(),
            ..Default::default()
        };
        let error = verify_timestamp(&request, DEFAULT_TIMESTAMP_TOLERANCE).unwrap_err();
        assert!(matches!(error, SkillError::UnparseableTimestamp(_)));
    }

    #[test]
    fn honor_a_zero_tolerance() {
        let request = request_with_offset(chrono::Duration::seconds(-1));
        let error = verify_timestamp(&request, Duration::from_secs(0)).unwrap_err();
        assert!(matches!(error, SkillError::TimestampOutOfTolerance { .. }));
    }
}
