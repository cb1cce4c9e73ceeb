#![forbid(unsafe_code)]

//! Navigation actions.
//!
//! Actions correspond one-to-one with user intents. All navigation-affecting
//! UI controls route through `NavEngine::dispatch` with one of these variants
//! rather than touching the history stack directly.

/// A user intent that may change the current [`ViewState`](crate::ViewState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Go to the public landing page.
    GoLanding,
    /// Show the about page.
    ShowAbout,
    /// Show the professionals landing page.
    ShowProfessionals,
    /// Start the professional registration flow.
    ShowProfessionalRegistration,
    /// Show the login form.
    ShowLogin,
    /// Show account registration.
    ShowRegister,
    /// Start the anonymous initial assessment.
    StartAssessment,
    /// Finish the initial assessment, carrying its session id into
    /// registration.
    CompleteAssessment {
        /// Session id handed to the registration screen.
        session_id: String,
    },
    /// The session service confirmed a successful login.
    LoginSucceeded,
    /// End the session and return to the landing page.
    Logout,
    /// Open a specific resource from the dashboard.
    OpenResource(u32),
    /// Leave the resource view, back to the dashboard.
    CloseResource,
}

impl NavAction {
    /// Short stable name for diagnostics and log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GoLanding => "go_landing",
            Self::ShowAbout => "show_about",
            Self::ShowProfessionals => "show_professionals",
            Self::ShowProfessionalRegistration => "show_professional_registration",
            Self::ShowLogin => "show_login",
            Self::ShowRegister => "show_register",
            Self::StartAssessment => "start_assessment",
            Self::CompleteAssessment { .. } => "complete_assessment",
            Self::LoginSucceeded => "login_succeeded",
            Self::Logout => "logout",
            Self::OpenResource(_) => "open_resource",
            Self::CloseResource => "close_resource",
        }
    }
}
