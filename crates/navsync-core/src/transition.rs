#![forbid(unsafe_code)]

//! The pure view transition function.
//!
//! [`transition`] is a total function of `(current, action, authenticated)`:
//! every action yields exactly one result. Invalid combinations are rejected
//! with a [`TransitionError`] rather than silently ignored; the caller decides
//! how to recover (the engine logs and leaves the state unchanged).
//!
//! No I/O happens here. Authentication status is passed in by the caller so
//! the function stays trivially unit-testable.

use crate::action::NavAction;
use crate::view::ViewState;

/// Why an action was rejected from the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The action targets an auth-gated state while unauthenticated.
    AuthRequired {
        /// Name of the rejected action.
        action: &'static str,
    },
    /// The action is not valid from the current state.
    InvalidFrom {
        /// Name of the rejected action.
        action: &'static str,
        /// Name of the state it was rejected from.
        from: &'static str,
    },
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthRequired { action } => {
                write!(f, "action `{action}` requires an authenticated session")
            }
            Self::InvalidFrom { action, from } => {
                write!(f, "action `{action}` is not valid from state `{from}`")
            }
        }
    }
}

impl std::error::Error for TransitionError {}

/// Compute the state an action leads to.
///
/// # Rules
///
/// - `Logout` always yields `Landing`, regardless of prior state.
/// - `LoginSucceeded` and `OpenResource` are gated on `authenticated`.
/// - `OpenResource` is only valid from the dashboard or from another open
///   resource (switching); anywhere else it is rejected.
/// - `CompleteAssessment` is only valid from `InitialAssessment` and carries
///   the session id into `Register`.
/// - The unauthenticated entry screens are reachable from anywhere.
pub fn transition(
    current: &ViewState,
    action: NavAction,
    authenticated: bool,
) -> Result<ViewState, TransitionError> {
    match action {
        NavAction::GoLanding => Ok(ViewState::Landing),
        NavAction::ShowAbout => Ok(ViewState::About),
        NavAction::ShowProfessionals => Ok(ViewState::ProfessionalLanding),
        NavAction::ShowProfessionalRegistration => Ok(ViewState::ProfessionalRegistration),
        NavAction::ShowLogin => Ok(ViewState::Login),
        NavAction::ShowRegister => Ok(ViewState::Register {
            prior_session_id: None,
        }),
        NavAction::StartAssessment => Ok(ViewState::InitialAssessment),
        NavAction::CompleteAssessment { session_id } => {
            if matches!(current, ViewState::InitialAssessment) {
                Ok(ViewState::Register {
                    prior_session_id: Some(session_id),
                })
            } else {
                Err(TransitionError::InvalidFrom {
                    action: "complete_assessment",
                    from: current.name(),
                })
            }
        }
        NavAction::LoginSucceeded => {
            if authenticated {
                Ok(ViewState::AuthenticatedHome)
            } else {
                Err(TransitionError::AuthRequired {
                    action: "login_succeeded",
                })
            }
        }
        NavAction::Logout => Ok(ViewState::Landing),
        NavAction::OpenResource(resource_id) => {
            if !authenticated {
                return Err(TransitionError::AuthRequired {
                    action: "open_resource",
                });
            }
            match current {
                ViewState::AuthenticatedHome | ViewState::ResourceDetail { .. } => {
                    Ok(ViewState::ResourceDetail { resource_id })
                }
                other => Err(TransitionError::InvalidFrom {
                    action: "open_resource",
                    from: other.name(),
                }),
            }
        }
        NavAction::CloseResource => match current {
            ViewState::ResourceDetail { .. } => Ok(ViewState::AuthenticatedHome),
            other => Err(TransitionError::InvalidFrom {
                action: "close_resource",
                from: other.name(),
            }),
        },
    }
}
