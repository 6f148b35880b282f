//! Skill configuration and lifecycle dispatch
//!
//! The [`Skill`] is the entry point of the library. It owns the
//! configuration surface (application identity, validation switches,
//! timestamp tolerance) and a host-supplied [`RequestHandler`], and turns
//! one inbound [`RequestEnvelope`] into one outbound [`ResponseEnvelope`]
//! per [`Skill::process_request`] call. The dispatcher only ever talks to
//! the host through the [`RequestHandler`] trait.

mod error;
pub mod validation;

pub use error::SkillError;

use async_trait::async_trait;
use log::{debug, error, warn};
use std::fmt;
use std::time::Duration;

use crate::constants::{
    DEFAULT_TIMESTAMP_TOLERANCE, REQUEST_TYPE_INTENT, REQUEST_TYPE_LAUNCH,
    REQUEST_TYPE_SESSION_ENDED,
};
use crate::domain::{DeviceContext, Request, RequestEnvelope, Response, ResponseEnvelope, Session};
use crate::EmptyResult;

/// Lifecycle events a [`RequestHandler`] can be invoked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A new session was opened by this request
    SessionStarted,
    /// The user launched the skill without naming an intent
    Launch,
    /// The platform recognized an intent
    Intent,
    /// The platform closed the session
    SessionEnded,
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleEvent::SessionStarted => "session-started",
            LifecycleEvent::Launch => "launch",
            LifecycleEvent::Intent => "intent",
            LifecycleEvent::SessionEnded => "session-ended",
        };
        write!(f, "{}", name)
    }
}

/// Callback set a host application implements to supply skill behavior
///
/// Each operation receives the request body, the mutable session (attribute
/// writes made there are copied into the outbound envelope), the optional
/// device context, and the response under construction. Callbacks mutate the
/// response through its setter operations rather than replacing it.
///
/// Returning an error aborts dispatch immediately: no further callbacks run
/// and the caller receives the error instead of a response.
#[async_trait]
pub trait RequestHandler {
    /// Invoked before the type-specific callback when the envelope opens a
    /// new session
    async fn on_session_started(
        &self,
        request: &Request,
        session: &mut Session,
        context: Option<&DeviceContext>,
        response: &mut Response,
    ) -> EmptyResult;

    /// Invoked when the user launched the skill without naming an intent
    async fn on_launch(
        &self,
        request: &Request,
        session: &mut Session,
        context: Option<&DeviceContext>,
        response: &mut Response,
    ) -> EmptyResult;

    /// Invoked when the platform recognized an intent
    async fn on_intent(
        &self,
        request: &Request,
        session: &mut Session,
        context: Option<&DeviceContext>,
        response: &mut Response,
    ) -> EmptyResult;

    /// Invoked when the platform closed the session
    async fn on_session_ended(
        &self,
        request: &Request,
        session: &mut Session,
        context: Option<&DeviceContext>,
        response: &mut Response,
    ) -> EmptyResult;
}

/// A configured skill deployment
///
/// Constructed with [`Skill::new`] and refined through the consuming builder
/// methods:
///
/// ```
/// # use skillkit::skill::{RequestHandler, Skill};
/// # use std::time::Duration;
/// # fn configure<H: RequestHandler>(handler: H) -> Skill<H> {
/// Skill::new("my-application-id", handler).timestamp_tolerance(Duration::from_secs(30))
/// # }
/// ```
pub struct Skill<H> {
    application_id: String,
    handler: H,
    ignore_application_id: bool,
    ignore_timestamp: bool,
    timestamp_tolerance: Duration,
}

impl<H: RequestHandler> Skill<H> {
    /// Creates a skill bound to the given application identifier
    ///
    /// Identity and timestamp checking start out enabled with the default
    /// tolerance of 150 seconds.
    pub fn new(application_id: impl Into<String>, handler: H) -> Self {
        Self {
            application_id: application_id.into(),
            handler,
            ignore_application_id: false,
            ignore_timestamp: false,
            timestamp_tolerance: DEFAULT_TIMESTAMP_TOLERANCE,
        }
    }

    /// Disables the application identity check
    ///
    /// Intended for local testing where requests are not stamped with a real
    /// application identifier.
    pub fn ignore_application_id(mut self) -> Self {
        self.ignore_application_id = true;
        self
    }

    /// Disables timestamp freshness checking
    ///
    /// Intended for local testing and replaying captured requests.
    pub fn ignore_timestamp(mut self) -> Self {
        self.ignore_timestamp = true;
        self
    }

    /// Overrides the maximum deviation between the request timestamp and the
    /// current time
    ///
    /// The tolerance is scoped to this instance; other skill instances in
    /// the same process are unaffected.
    pub fn timestamp_tolerance(mut self, tolerance: Duration) -> Self {
        self.timestamp_tolerance = tolerance;
        self
    }

    /// Provides a reference to the wrapped handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Processes one request envelope end to end
    ///
    /// Runs the enabled validation checks (short-circuiting on the first
    /// failure), prepares a response envelope with the default
    /// `should_end_session = true`, invokes the session-started callback for
    /// new sessions followed by the callback matching the request type, and
    /// finalizes by copying the session attributes into the envelope. An
    /// unrecognized request type invokes no callback and yields the prepared
    /// defaults.
    ///
    /// Cancellation and deadlines are the caller's ambient task context:
    /// dropping or timing out the returned future cancels the in-flight
    /// callback with it. The library never inspects either.
    pub async fn process_request(
        &self,
        mut envelope: RequestEnvelope,
    ) -> Result<ResponseEnvelope, SkillError> {
        if !self.ignore_application_id {
            validation::verify_application_id(&envelope, &self.application_id)?;
        }
        if !self.ignore_timestamp {
            validation::verify_timestamp(&envelope.request, self.timestamp_tolerance)?;
        } else {
            warn!(
                "Timestamp verification is disabled, accepting request {} as-is",
                envelope.request.request_id
            );
        }

        let mut response_envelope = ResponseEnvelope::new();

        // The session attribute mapping deserializes to an empty map when
        // absent, so callbacks can write into it unconditionally.
        let RequestEnvelope {
            session,
            request,
            context,
            ..
        } = &mut envelope;
        let request: &Request = request;
        let context = context.as_ref();
        let response = &mut response_envelope.response;

        if session.new {
            self.invoke(LifecycleEvent::SessionStarted, request, session, context, response)
                .await?;
        }

        match request.request_type.as_str() {
            REQUEST_TYPE_LAUNCH => {
                self.invoke(LifecycleEvent::Launch, request, session, context, response)
                    .await?
            }
            REQUEST_TYPE_INTENT => {
                self.invoke(LifecycleEvent::Intent, request, session, context, response)
                    .await?
            }
            REQUEST_TYPE_SESSION_ENDED => {
                self.invoke(LifecycleEvent::SessionEnded, request, session, context, response)
                    .await?
            }
            other => debug!("No callback for request type {:?}, returning defaults", other),
        }

        for (name, value) in &session.attributes.values {
            debug!("Propagating session attribute {} into the response", name);
            response_envelope
                .session_attributes
                .insert(name.clone(), value.clone());
        }

        Ok(response_envelope)
    }

    async fn invoke(
        &self,
        event: LifecycleEvent,
        request: &Request,
        session: &mut Session,
        context: Option<&DeviceContext>,
        response: &mut Response,
    ) -> Result<(), SkillError> {
        let result = match event {
            LifecycleEvent::SessionStarted => {
                self.handler
                    .on_session_started(request, session, context, response)
                    .await
            }
            LifecycleEvent::Launch => {
                self.handler
                    .on_launch(request, session, context, response)
                    .await
            }
            LifecycleEvent::Intent => {
                self.handler
                    .on_intent(request, session, context, response)
                    .await
            }
            LifecycleEvent::SessionEnded => {
                self.handler
                    .on_session_ended(request, session, context, response)
                    .await
            }
        };

        result.map_err(|source| {
            error!("Error handling {} callback: {}", event, source);
            SkillError::Callback { event, source }
        })
    }
}
