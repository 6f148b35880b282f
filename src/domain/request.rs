//! Inbound request envelope structures
//!
//! Everything in here is deserialized from the JSON document the invocation
//! layer hands over. Fields default to their empty value where the contract
//! allows omission so that older producers and future request types keep
//! deserializing cleanly.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::context::DeviceContext;

/// Top-level inbound payload describing one spoken interaction
///
/// Lifetime is a single dispatch call: the dispatcher consumes the envelope,
/// threads its parts through the lifecycle callbacks, and drops it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    /// Protocol version of the sending platform
    #[serde(default)]
    pub version: String,

    /// Session the interaction belongs to
    pub session: Session,

    /// Body describing the user interaction
    pub request: Request,

    /// Device and platform metadata, absent on older contract versions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<DeviceContext>,
}

/// Session data accompanying the request
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Whether this request opens a new session
    #[serde(default)]
    pub new: bool,

    /// Unique identifier of the session
    #[serde(default)]
    pub session_id: String,

    /// Attribute mapping carried across the turns of a session
    ///
    /// Deserializes to an empty mapping when absent, so callbacks can always
    /// write into it. Mutations made here are copied into the outbound
    /// envelope when dispatch finalizes.
    #[serde(default)]
    pub attributes: SessionAttributes,

    /// User the session belongs to
    #[serde(default)]
    pub user: SessionUser,

    /// Application the request was addressed to
    #[serde(default)]
    pub application: ApplicationReference,
}

/// String-keyed session attribute mapping
///
/// The wire contract nests the mapping under a `string` key. Values are kept
/// as dynamic JSON since the library only forwards them, never interprets
/// them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SessionAttributes {
    /// The attribute mapping itself
    #[serde(rename = "string", default, skip_serializing_if = "HashMap::is_empty")]
    pub values: HashMap<String, Value>,
}

/// User identity attached to the session
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Opaque user identifier
    #[serde(default)]
    pub user_id: String,

    /// Token for account-linked skills, absent unless the account is linked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Reference to a deployed skill application
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReference {
    /// Identifier the platform assigned to the skill deployment
    #[serde(default)]
    pub application_id: String,
}

/// Body of the request inside the envelope
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Locale the user interacted in, e.g. `en-US`
    #[serde(default)]
    pub locale: String,

    /// RFC3339 timestamp at which the platform created the request
    ///
    /// Kept as the raw string: parsing happens during validation so a
    /// malformed value is reported as a validation failure rather than a
    /// deserialization error.
    #[serde(default)]
    pub timestamp: String,

    /// Request type discriminator
    ///
    /// Deliberately an open string instead of an enum: unrecognized types
    /// must deserialize and simply dispatch to no callback.
    #[serde(rename = "type", default)]
    pub request_type: String,

    /// Unique identifier of this request
    #[serde(default)]
    pub request_id: String,

    /// State of an in-flight multi-turn dialog, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_state: Option<String>,

    /// Recognized intent, empty for non-intent request types
    #[serde(default)]
    pub intent: Intent,
}

/// A recognized user intent and its extracted parameters
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Name of the intent
    #[serde(default)]
    pub name: String,

    /// Whether the user confirmed or denied the intent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,

    /// Slot values extracted from the utterance, keyed by slot name
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub slots: HashMap<String, IntentSlot>,
}

/// One extracted slot of an intent
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntentSlot {
    /// Name of the slot
    #[serde(default)]
    pub name: String,

    /// Whether the user confirmed or denied the slot value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,

    /// Raw value as heard, absent when the slot was not filled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Entity resolution results for the raw value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolutions: Option<Resolutions>,

    /// Structured value covering both scalar and multi-value slots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_value: Option<SlotValue>,
}

/// Structured slot value
///
/// A slot either carries one scalar value or a list of values collected from
/// a single utterance; the two shapes are distinguished by the `type` field
/// on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum SlotValue {
    /// A single scalar value
    Simple {
        /// The value as heard
        #[serde(default)]
        value: String,

        /// Entity resolution results for the value
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolutions: Option<Resolutions>,
    },

    /// Multiple values collected for the same slot
    List {
        /// The collected values, in utterance order
        #[serde(default)]
        values: Vec<SlotValue>,
    },
}

/// Entity resolution results for a slot value
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    /// One resolution result per authority that was consulted
    #[serde(default)]
    pub resolutions_per_authority: Vec<ResolutionsPerAuthority>,
}

/// Resolution verdict of a single authority
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionsPerAuthority {
    /// Identifier of the resolving authority
    #[serde(default)]
    pub authority: String,

    /// Whether the authority found a match
    #[serde(default)]
    pub status: ResolutionStatus,

    /// Matched entities, best match first
    #[serde(default)]
    pub values: Vec<ResolutionValueContainer>,
}

/// Match status reported by a resolution authority
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionStatus {
    /// Status code, e.g. `ER_SUCCESS_MATCH`
    #[serde(default)]
    pub code: String,
}

/// Wrapper object around one resolved entity
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionValueContainer {
    /// The resolved entity
    #[serde(default)]
    pub value: ResolutionValue,
}

/// One resolved entity
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionValue {
    /// Canonical name of the entity
    #[serde(default)]
    pub name: String,

    /// Identifier of the entity within its authority
    #[serde(default)]
    pub id: String,
}
