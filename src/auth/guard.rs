use tracing::debug;

use super::claims::Role;
use super::session::Session;

/// Outcome of a guard check for a restricted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session holds an allowed role; show the view
    Render,
    /// No credential, or no provable role; authentication is required
    RedirectLogin,
    /// Signed in with a recognized role this view does not allow
    RedirectHome,
}

/// Decide whether the session may enter a view restricted to `allowed`.
///
/// Default-deny: a session whose role cannot be established redirects to
/// login even when a credential is present, since holding an undecodable
/// token proves nothing. Only a decoded role contained in `allowed`
/// renders.
pub fn decide(session: &Session, allowed: &[Role]) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::RedirectLogin;
    }
    match session.role() {
        Some(role) if allowed.contains(&role) => GuardDecision::Render,
        Some(role) => {
            debug!(role = %role, "Role not permitted for this view");
            GuardDecision::RedirectHome
        }
        None => {
            debug!("Credential held but no role decoded, denying");
            GuardDecision::RedirectLogin
        }
    }
}
