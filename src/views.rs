//! View registry and role requirements.
//!
//! Mirrors the navigation structure of the client: public lookup views
//! plus two restricted ones. `allowed_roles` is the single source of
//! truth the guard consults; a view with `None` is open to everyone.

use crate::auth::Role;

/// Navigable views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Report,
    Dashboard,
    Map,
}

impl View {
    /// Display title for this view
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Report => "Water Quality Report",
            View::Dashboard => "Operator Dashboard",
            View::Map => "Regulator Map",
        }
    }

    /// Roles allowed to enter, or `None` when the view is public
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            View::Home | View::Report => None,
            View::Dashboard => Some(&[Role::Operator]),
            View::Map => Some(&[Role::Regulator]),
        }
    }
}
