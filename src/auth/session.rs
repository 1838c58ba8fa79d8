use tracing::{debug, warn};

use super::claims::{self, ClaimSet, Role};
use super::store::TokenStore;

/// Current credential and the role derived from it.
///
/// Two states: anonymous (no credential) and authenticated (credential
/// held). An authenticated session whose token does not decode keeps the
/// credential but exposes no role; the guard treats that the same as
/// being signed out, while requests still carry the token.
///
/// The session is built once at startup and owned by the `App` context.
/// Persistence failures are logged and swallowed: losing the token file
/// costs a re-login, nothing more.
pub struct Session {
    store: TokenStore,
    credential: Option<String>,
    role: Option<Role>,
}

impl Session {
    /// Build the session from whatever credential the store holds.
    ///
    /// An absent credential yields an anonymous session. A stored token
    /// that fails to decode is kept with no role.
    pub fn initialize(store: TokenStore) -> Self {
        let credential = store.get();
        let role = credential.as_deref().and_then(derive_role);
        debug!(
            authenticated = credential.is_some(),
            role = ?role,
            "Session initialized"
        );
        Self {
            store,
            credential,
            role,
        }
    }

    /// Accept a new credential, replacing any previous one.
    ///
    /// The transition to authenticated happens regardless of whether the
    /// token decodes; a role is derived only when it does. Surrounding
    /// whitespace is stripped so the held credential matches what the
    /// store will hand back after a restart.
    pub fn login(&mut self, token: &str) {
        let token = token.trim();
        if let Err(e) = self.store.set(token) {
            warn!(error = %e, "Failed to persist token");
        }
        self.role = derive_role(token);
        self.credential = Some(token.to_string());
    }

    /// Drop the credential and return to anonymous. Safe to call repeatedly.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored token");
        }
        self.credential = None;
        self.role = None;
    }

    /// The bearer credential, if signed in
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// The role derived from the credential, if it decoded
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Whether a credential is held, decodable or not
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Decode the current credential's full claims for display.
    /// Recomputed on every call; `None` for anonymous or undecodable.
    pub fn claims(&self) -> Option<ClaimSet> {
        self.credential
            .as_deref()
            .and_then(|token| claims::decode(token).ok())
    }
}

fn derive_role(token: &str) -> Option<Role> {
    match claims::decode(token) {
        Ok(claims) => Some(claims.role),
        Err(e) => {
            warn!(error = %e, "Token does not decode; no role available");
            None
        }
    }
}
