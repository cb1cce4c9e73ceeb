#![forbid(unsafe_code)]

//! Canonical view states.
//!
//! Exactly one [`ViewState`] is current at any time; it is the single source
//! of truth for which screen is logically active. All variants derive `Clone`,
//! `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Payload that is not encoded in the canonical path (`prior_session_id`)
//!   is transient and lost across a history round trip.
//! - `ResourceDetail` carries the resource id, but the id rides in the URL
//!   fragment rather than the path so that switching resources does not add
//!   top-level history depth.

/// The logical screen the application is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Public landing page.
    Landing,

    /// Static "about" page.
    About,

    /// Landing page for professionals.
    ProfessionalLanding,

    /// Registration flow for professionals.
    ProfessionalRegistration,

    /// Login form.
    Login,

    /// Account registration.
    Register {
        /// Assessment session carried over when registration follows the
        /// initial assessment. Not encoded in the canonical path.
        prior_session_id: Option<String>,
    },

    /// The anonymous initial assessment flow.
    InitialAssessment,

    /// Authenticated home dashboard.
    AuthenticatedHome,

    /// A specific resource opened from the dashboard.
    ResourceDetail {
        /// Identifier of the opened resource.
        resource_id: u32,
    },
}

impl ViewState {
    /// Whether this state is only reachable while authenticated.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        matches!(self, Self::AuthenticatedHome | Self::ResourceDetail { .. })
    }

    /// Whether entering this state discards any in-progress resource context,
    /// including the tracked deep-link id.
    #[must_use]
    pub const fn clears_resource_context(&self) -> bool {
        matches!(self, Self::Landing | Self::Login | Self::Register { .. })
    }

    /// Short stable name for diagnostics and log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::About => "about",
            Self::ProfessionalLanding => "professional_landing",
            Self::ProfessionalRegistration => "professional_registration",
            Self::Login => "login",
            Self::Register { .. } => "register",
            Self::InitialAssessment => "initial_assessment",
            Self::AuthenticatedHome => "authenticated_home",
            Self::ResourceDetail { .. } => "resource_detail",
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::Landing
    }
}
