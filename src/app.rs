//! Application context.
//!
//! This module contains the `App` struct owning the configuration, the
//! session, and the API client. It is constructed once in `main` and
//! borrowed by the command handlers; there is no global state.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, DEFAULT_API_URL};
use crate::auth::{decide, GuardDecision, Session, TokenStore};
use crate::config::Config;
use crate::views::View;

pub struct App {
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,
}

impl App {
    /// Create the application context.
    ///
    /// Loads config (falling back to defaults on failure), restores the
    /// session from the persisted token, and builds the API client.
    /// `CLEARWELL_API_URL` overrides the configured base URL.
    pub fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let data_dir = Config::data_dir().unwrap_or_else(|_| PathBuf::from("./data"));
        debug!(?data_dir, "Data directory configured");

        let session = Session::initialize(TokenStore::new(data_dir.clone()));

        let base_url = std::env::var("CLEARWELL_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        debug!(base_url = %base_url, "API base URL configured");

        let api = ApiClient::new(base_url, TokenStore::new(data_dir))?;

        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Accept a bearer token for this and future runs
    pub fn login(&mut self, token: &str) {
        self.session.login(token);
        match self.session.role() {
            Some(role) => info!(role = %role, "Signed in"),
            None => info!("Signed in without a recognized role"),
        }
    }

    /// Discard the session and the persisted token
    pub fn logout(&mut self) {
        self.session.logout();
        info!("Signed out");
    }

    /// Evaluate the guard for a view. Public views always render.
    pub fn check_access(&self, view: View) -> GuardDecision {
        match view.allowed_roles() {
            None => GuardDecision::Render,
            Some(allowed) => decide(&self.session, allowed),
        }
    }
}
