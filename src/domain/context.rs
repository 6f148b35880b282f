//! Device and platform metadata attached to a request
//!
//! Everything in here is read-only from the library's perspective: it is
//! deserialized, handed to the lifecycle callbacks untouched, and never
//! written back into the response.

use serde::{Deserialize, Serialize};

use super::request::ApplicationReference;

/// Device and platform state at the time the request was made
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DeviceContext {
    /// Platform-level information about the device, application, and user
    #[serde(rename = "System", default)]
    pub system: SystemContext,

    /// Playback state of the device's audio player, if it has one
    #[serde(rename = "AudioPlayer", default, skip_serializing_if = "Option::is_none")]
    pub audio_player: Option<AudioPlayerContext>,
}

/// Platform information block of the device context
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemContext {
    /// The device the user spoke to
    #[serde(default)]
    pub device: Device,

    /// Application the request was addressed to, duplicated from the session
    #[serde(default)]
    pub application: ApplicationReference,

    /// User identity as seen by the platform
    #[serde(default)]
    pub user: SystemUser,

    /// Base URL for platform API calls on behalf of this request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,

    /// Short-lived token authorizing platform API calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_access_token: Option<String>,
}

/// The device a request originated from
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Opaque device identifier
    #[serde(default)]
    pub device_id: String,

    /// Interfaces the device supports
    #[serde(default)]
    pub supported_interfaces: SupportedInterfaces,
}

/// Interface support advertised by the device
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SupportedInterfaces {
    /// Present when the device can play directed audio streams
    #[serde(rename = "AudioPlayer", default, skip_serializing_if = "Option::is_none")]
    pub audio_player: Option<AudioPlayerInterface>,
}

/// Marker object whose presence signals audio playback support
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AudioPlayerInterface {}

/// User identity inside the system context
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemUser {
    /// Opaque user identifier
    #[serde(default)]
    pub user_id: String,

    /// Token for account-linked skills
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Consents the user granted to the skill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
}

/// Consents granted by the user
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    /// Token proving the granted consents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent_token: Option<String>,
}

/// Audio playback state of the device
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerContext {
    /// Current player activity, e.g. `IDLE` or `PLAYING`
    #[serde(default)]
    pub player_activity: String,

    /// Token of the stream most recently played
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Playback offset into the current stream
    #[serde(default)]
    pub offset_in_milliseconds: u64,
}
