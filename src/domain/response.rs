//! Outbound response envelope structures and assembly helpers
//!
//! The response side of the contract is serialize-only: envelopes are created
//! fresh by the dispatcher for every call and populated through the setter
//! operations below, never parsed back. Optional fields are omitted from the
//! serialized document when absent.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use super::request::Intent;
use crate::constants::PROTOCOL_VERSION;

/// Top-level outbound payload
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// Protocol version, always [`PROTOCOL_VERSION`]
    pub version: String,

    /// Session attributes to carry into the next turn, omitted when empty
    ///
    /// Populated by the dispatcher from the (possibly callback-mutated)
    /// session attribute mapping when dispatch finalizes.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub session_attributes: HashMap<String, Value>,

    /// Body of the response
    pub response: Response,
}

impl ResponseEnvelope {
    /// Creates an envelope with no attributes and a default response body
    pub fn new() -> Self {
        Self {
            version: PROTOCOL_VERSION.to_string(),
            session_attributes: HashMap::new(),
            response: Response::default(),
        }
    }
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of the response, mutated by lifecycle callbacks
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// What the assistant should say
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    /// Card shown in the user's companion app
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,

    /// Speech played when the user does not answer within the reprompt window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,

    /// Device directives, executed in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,

    /// Whether the session closes after this response, defaults to `true`
    pub should_end_session: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            output_speech: None,
            card: None,
            reprompt: None,
            directives: Vec::new(),
            should_end_session: true,
        }
    }
}

/// Speech output, either plain text or markup
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    /// Text read out verbatim
    PlainText {
        /// The text to speak
        text: String,
    },

    /// Markup controlling pronunciation, pauses, and audio clips
    #[serde(rename = "SSML")]
    Ssml {
        /// The markup document, wrapped in `<speak>` tags
        ssml: String,
    },
}

/// Card displayed in the user's companion app
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Card {
    /// Title and plain text content
    Simple {
        /// Card title
        #[serde(skip_serializing_if = "String::is_empty")]
        title: String,

        /// Card body text
        #[serde(skip_serializing_if = "String::is_empty")]
        content: String,
    },

    /// Title, body text, and an image
    Standard {
        /// Card title
        #[serde(skip_serializing_if = "String::is_empty")]
        title: String,

        /// Card body text
        #[serde(skip_serializing_if = "String::is_empty")]
        text: String,

        /// Image shown on the card
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<Image>,
    },

    /// Prompts the user to link their account, carries no body
    LinkAccount,
}

/// Image URLs for a standard card
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// URL of the small rendition
    #[serde(skip_serializing_if = "String::is_empty")]
    pub small_image_url: String,

    /// URL of the large rendition
    #[serde(skip_serializing_if = "String::is_empty")]
    pub large_image_url: String,
}

/// Speech played when the user needs to be prompted again
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    /// What the assistant should say when reprompting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
}

/// Device instruction attached to the response
///
/// Directives are heterogeneous: each shape serializes with its own `type`
/// discriminator and only the fields relevant to it. The discriminator stays
/// an open string (`AudioPlayer.Play`, `Dialog.Delegate`, …) so new concrete
/// directive names need no library change.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Directive {
    /// Audio playback instruction
    AudioPlayer(AudioPlayerDirective),

    /// Multi-turn dialog management instruction
    Dialog(DialogDirective),
}

/// Instruction controlling audio stream playback on the device
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayerDirective {
    /// Concrete directive name, e.g. `AudioPlayer.Play`
    #[serde(rename = "type")]
    pub directive_type: String,

    /// How the stream relates to the current playback queue
    #[serde(skip_serializing_if = "String::is_empty")]
    pub play_behavior: String,

    /// The audio stream to play
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_item: Option<AudioItem>,
}

/// Audio stream definition for playback
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AudioItem {
    /// The stream itself
    pub stream: Stream,
}

/// Playback instructions for one audio stream
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    /// Opaque token identifying the stream
    pub token: String,

    /// URL of the stream
    pub url: String,

    /// Offset at which playback starts
    pub offset_in_milliseconds: u64,
}

/// Instruction steering a multi-turn dialog
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DialogDirective {
    /// Concrete directive name, e.g. `Dialog.Delegate`
    #[serde(rename = "type")]
    pub directive_type: String,

    /// Slot the platform should elicit from the user next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_to_elicit: Option<String>,

    /// Slot the platform should ask the user to confirm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_to_confirm: Option<String>,

    /// Replacement intent the dialog continues with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_intent: Option<Intent>,
}

impl Response {
    /// Sets a simple card with the given title and content
    ///
    /// Card variants are mutually exclusive, the last call wins.
    pub fn set_simple_card(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.card = Some(Card::Simple {
            title: title.into(),
            content: content.into(),
        });
    }

    /// Sets a standard card with body text and image renditions
    pub fn set_standard_card(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        small_image_url: impl Into<String>,
        large_image_url: impl Into<String>,
    ) {
        self.card = Some(Card::Standard {
            title: title.into(),
            text: text.into(),
            image: Some(Image {
                small_image_url: small_image_url.into(),
                large_image_url: large_image_url.into(),
            }),
        });
    }

    /// Sets an account-linking card
    pub fn set_link_account_card(&mut self) {
        self.card = Some(Card::LinkAccount);
    }

    /// Sets the output speech to plain text, replacing any previous speech
    pub fn set_output_text(&mut self, text: impl Into<String>) {
        self.output_speech = Some(OutputSpeech::PlainText { text: text.into() });
    }

    /// Sets the output speech to markup, replacing any previous speech
    pub fn set_output_ssml(&mut self, ssml: impl Into<String>) {
        self.output_speech = Some(OutputSpeech::Ssml { ssml: ssml.into() });
    }

    /// Sets the reprompt speech to plain text, creating the reprompt wrapper
    /// on first use
    pub fn set_reprompt_text(&mut self, text: impl Into<String>) {
        self.reprompt.get_or_insert_with(Reprompt::default).output_speech =
            Some(OutputSpeech::PlainText { text: text.into() });
    }

    /// Sets the reprompt speech to markup, creating the reprompt wrapper on
    /// first use
    pub fn set_reprompt_ssml(&mut self, ssml: impl Into<String>) {
        self.reprompt.get_or_insert_with(Reprompt::default).output_speech =
            Some(OutputSpeech::Ssml { ssml: ssml.into() });
    }

    /// Appends an audio-player directive to the directive sequence
    pub fn add_audio_player_directive(
        &mut self,
        directive_type: impl Into<String>,
        play_behavior: impl Into<String>,
        token: impl Into<String>,
        url: impl Into<String>,
        offset_in_milliseconds: u64,
    ) {
        self.directives
            .push(Directive::AudioPlayer(AudioPlayerDirective {
                directive_type: directive_type.into(),
                play_behavior: play_behavior.into(),
                audio_item: Some(AudioItem {
                    stream: Stream {
                        token: token.into(),
                        url: url.into(),
                        offset_in_milliseconds,
                    },
                }),
            }));
    }

    /// Appends a dialog directive, optionally carrying an updated intent
    pub fn add_dialog_directive(
        &mut self,
        directive_type: impl Into<String>,
        slot_to_elicit: Option<String>,
        slot_to_confirm: Option<String>,
        updated_intent: Option<Intent>,
    ) {
        self.directives.push(Directive::Dialog(DialogDirective {
            directive_type: directive_type.into(),
            slot_to_elicit,
            slot_to_confirm,
            updated_intent,
        }));
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use crate::domain::IntentSlot;

    #[test]
    fn default_to_ending_the_session() {
        let response = Response::default();
        assert!(response.should_end_session);

        let serialized = serde_json::to_string(&response).unwrap();
        assert_eq!(serialized, r#"{"shouldEndSession":true}"#);
    }

    #[test]
    fn serialize_plain_text_speech_without_an_ssml_key() {
        let mut response = Response::default();
        response.set_output_text("Hello");

        let serialized = serde_json::to_value(&response).unwrap();
        let speech = &serialized["outputSpeech"];

        assert_eq!(speech["type"], "PlainText");
        assert_eq!(speech["text"], "Hello");
        assert!(speech.get("ssml").is_none());
    }

    #[test]
    fn replace_plain_text_speech_entirely_when_switching_to_ssml() {
        let mut response = Response::default();
        response.set_output_text("Hello");
        response.set_output_ssml("<speak>Hello</speak>");

        let serialized = serde_json::to_value(&response).unwrap();
        let speech = &serialized["outputSpeech"];

        assert_eq!(speech["type"], "SSML");
        assert_eq!(speech["ssml"], "<speak>Hello</speak>");
        assert!(speech.get("text").is_none());
    }

    #[test]
    fn create_the_reprompt_wrapper_on_first_use() {
        let mut response = Response::default();
        assert!(response.reprompt.is_none());

        response.set_reprompt_text("Still there?");
        assert_eq!(
            response.reprompt.unwrap().output_speech,
            Some(OutputSpeech::PlainText {
                text: "Still there?".into()
            })
        );
    }

    #[test]
    fn treat_card_variants_as_mutually_exclusive() {
        let mut response = Response::default();
        response.set_standard_card("Title", "Body", "http://small.url", "http://large.url");
        response.set_link_account_card();

        assert_eq!(response.card, Some(Card::LinkAccount));
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["card"], serde_json::json!({"type": "LinkAccount"}));
    }

    #[test]
    fn serialize_a_standard_card_with_image_renditions() {
        let mut response = Response::default();
        response.set_standard_card("Title", "Body", "http://small.url", "http://large.url");

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(
            serialized["card"],
            serde_json::json!({
                "type": "Standard",
                "title": "Title",
                "text": "Body",
                "image": {
                    "smallImageUrl": "http://small.url",
                    "largeImageUrl": "http://large.url"
                }
            })
        );
    }

    #[test]
    fn keep_appended_directives_in_call_order() {
        let mut response = Response::default();
        response.add_audio_player_directive(
            "AudioPlayer.Play",
            "REPLACE_ALL",
            "track-1",
            "https://audio.example.com/track-1.mp3",
            0,
        );
        response.add_audio_player_directive(
            "AudioPlayer.Play",
            "ENQUEUE",
            "track-2",
            "https://audio.example.com/track-2.mp3",
            100,
        );

        assert_eq!(response.directives.len(), 2);

        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(serialized["directives"][0]["audioItem"]["stream"]["token"], "track-1");
        assert_eq!(serialized["directives"][1]["audioItem"]["stream"]["token"], "track-2");
    }

    #[test]
    fn serialize_an_audio_player_directive_with_its_discriminator() {
        let mut response = Response::default();
        response.add_audio_player_directive(
            "AudioPlayer.Play",
            "REPLACE_ALL",
            "track2-long-audio",
            "https://audio.example.com/sample-song-2.mp3",
            100,
        );

        let serialized = serde_json::to_string(&response.directives[0]).unwrap();
        assert_eq!(
            serialized,
            r#"{"type":"AudioPlayer.Play","playBehavior":"REPLACE_ALL","audioItem":{"stream":{"token":"track2-long-audio","url":"https://audio.example.com/sample-song-2.mp3","offsetInMilliseconds":100}}}"#
        );
    }

    #[test]
    fn serialize_a_dialog_directive_with_an_updated_intent() {
        let mut intent = Intent {
            name: "PlanMyTrip".into(),
            confirmation_status: Some("NONE".into()),
            slots: Default::default(),
        };
        intent.slots.insert(
            "travelDate".into(),
            IntentSlot {
                name: "travelDate".into(),
                confirmation_status: Some("NONE".into()),
                value: Some("2017-04-21".into()),
                resolutions: None,
                slot_value: None,
            },
        );

        let mut response = Response::default();
        response.add_dialog_directive("Dialog.Delegate", None, None, Some(intent));

        let serialized = serde_json::to_string(&response.directives[0]).unwrap();
        assert_eq!(
            serialized,
            r#"{"type":"Dialog.Delegate","updatedIntent":{"name":"PlanMyTrip","confirmationStatus":"NONE","slots":{"travelDate":{"name":"travelDate","confirmationStatus":"NONE","value":"2017-04-21"}}}}"#
        );
    }

    #[test]
    fn serialize_a_bare_dialog_directive_as_only_its_discriminator() {
        let mut response = Response::default();
        response.add_dialog_directive("Dialog.Delegate", None, None, None);

        let serialized = serde_json::to_string(&response.directives[0]).unwrap();
        assert_eq!(serialized, r#"{"type":"Dialog.Delegate"}"#);
    }

    #[test]
    fn omit_empty_session_attributes_from_the_envelope() {
        let envelope = ResponseEnvelope::new();
        let serialized = serde_json::to_value(&envelope).unwrap();

        assert_eq!(serialized["version"], "1.0");
        assert!(serialized.get("sessionAttributes").is_none());
    }
}
