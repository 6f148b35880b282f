//! Building blocks for a voice-assistant skill backend.
//!
//! This crate takes one structured request envelope describing a spoken
//! interaction, validates it, routes it to the lifecycle callbacks a host
//! application supplies, and assembles the outbound response envelope. Each
//! invocation is a single-pass transformation with no persistent state, which
//! makes it a natural fit for one-shot serverless invocations.
//!
//! Responsibilities are split across two modules: the passive envelope data
//! model lives in [`domain`] while the validation and dispatch pipeline lives
//! in [`skill`]. JSON encoding/decoding of the envelopes and the invocation
//! mechanism that delivers them are the embedder's concern.
//!
//! ```no_run
//! use async_trait::async_trait;
//! use skillkit::domain::{DeviceContext, Request, RequestEnvelope, Response, Session};
//! use skillkit::skill::{RequestHandler, Skill};
//! use skillkit::EmptyResult;
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl RequestHandler for Greeter {
//!     async fn on_session_started(
//!         &self,
//!         _request: &Request,
//!         _session: &mut Session,
//!         _context: Option<&DeviceContext>,
//!         _response: &mut Response,
//!     ) -> EmptyResult {
//!         Ok(())
//!     }
//!
//!     async fn on_launch(
//!         &self,
//!         _request: &Request,
//!         _session: &mut Session,
//!         _context: Option<&DeviceContext>,
//!         response: &mut Response,
//!     ) -> EmptyResult {
//!         response.set_output_text("Hello!");
//!         response.set_simple_card("Greeter", "Hello!");
//!         Ok(())
//!     }
//!
//!     async fn on_intent(
//!         &self,
//!         _request: &Request,
//!         _session: &mut Session,
//!         _context: Option<&DeviceContext>,
//!         _response: &mut Response,
//!     ) -> EmptyResult {
//!         Ok(())
//!     }
//!
//!     async fn on_session_ended(
//!         &self,
//!         _request: &Request,
//!         _session: &mut Session,
//!         _context: Option<&DeviceContext>,
//!         _response: &mut Response,
//!     ) -> EmptyResult {
//!         Ok(())
//!     }
//! }
//!
//! # async fn handle(raw: &str) -> Result<String, skillkit::BoxedError> {
//! let skill = Skill::new("my-application-id", Greeter);
//! let envelope: RequestEnvelope = serde_json::from_str(raw)?;
//! let response = skill.process_request(envelope).await?;
//! Ok(serde_json::to_string(&response)?)
//! # }
//! ```

#![deny(missing_docs)]

pub mod constants;
pub mod domain;
pub mod skill;

/// Generic error type
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result with no value and a [`BoxedError`]
pub type EmptyResult = Result<(), BoxedError>;
