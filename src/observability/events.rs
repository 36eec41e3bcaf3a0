//! Observable events
//!
//! Every log line the crate emits carries one of these as its `event`
//! field, so logs can be filtered by name rather than by message text.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Client configuration loaded
    ConfigLoaded,

    // Authentication
    /// Credential mode chosen for a request
    AuthModeResolved,
    /// Identity lookup failed for a reason other than "no session"
    IdentityLookupFailed,

    // Forms
    /// Draft failed validation; nothing was sent
    SubmitRejected,
    /// Validated draft about to be sent
    SubmitBegin,
    /// Record created; draft reset
    SubmitComplete,
    /// Create request failed; draft kept
    SubmitFailed,
    /// Draft discarded without submission
    DraftDiscarded,

    // Data service
    /// Create request issued
    CreateBegin,
    /// Create request acknowledged
    CreateComplete,
    /// Create request failed
    CreateFailed,

    // Location dialog
    /// Location accepted by the dialog
    LocationCaptured,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::AuthModeResolved => "AUTH_MODE_RESOLVED",
            Event::IdentityLookupFailed => "IDENTITY_LOOKUP_FAILED",

            Event::SubmitRejected => "SUBMIT_REJECTED",
            Event::SubmitBegin => "SUBMIT_BEGIN",
            Event::SubmitComplete => "SUBMIT_COMPLETE",
            Event::SubmitFailed => "SUBMIT_FAILED",
            Event::DraftDiscarded => "DRAFT_DISCARDED",

            Event::CreateBegin => "CREATE_BEGIN",
            Event::CreateComplete => "CREATE_COMPLETE",
            Event::CreateFailed => "CREATE_FAILED",

            Event::LocationCaptured => "LOCATION_CAPTURED",
        }
    }

    /// Returns true if the event reports a failure worth a warning
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::SubmitFailed | Event::CreateFailed | Event::IdentityLookupFailed
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
