//! Wire-level constants shared between the envelope data model and the dispatcher

use std::time::Duration;

/// Protocol version stamped into every outbound response envelope
pub const PROTOCOL_VERSION: &str = "1.0";

/// Request type sent when the user opens the skill without naming an intent
pub const REQUEST_TYPE_LAUNCH: &str = "LaunchRequest";

/// Request type sent when the platform recognized an intent
pub const REQUEST_TYPE_INTENT: &str = "IntentRequest";

/// Request type sent when the platform closed the session
pub const REQUEST_TYPE_SESSION_ENDED: &str = "SessionEndedRequest";

/// Default maximum deviation between the request timestamp and the current time
pub const DEFAULT_TIMESTAMP_TOLERANCE: Duration = Duration::from_secs(150);
