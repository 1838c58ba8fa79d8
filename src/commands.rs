//! Command handlers for the CLI.
//!
//! Each handler borrows the `App` context and prints a plain-text report.
//! The dashboard and map commands are gated by role through the view
//! registry; everything else is public.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::app::App;
use crate::auth::GuardDecision;
use crate::models::{SafetyStatus, Violation, WaterSystem};
use crate::utils::{format_count, format_date, format_optional, format_phone, truncate_string};
use crate::views::View;

// ============================================================================
// Constants
// ============================================================================

/// Width of the name column in listing output
const NAME_COLUMN_WIDTH: usize = 38;

/// Maximum concurrent status requests for the map listing.
/// Limits parallel requests to avoid overwhelming the server.
const MAX_CONCURRENT_REQUESTS: usize = 10;

// ===== Session Commands =====

/// Sign in with a token from the argument, environment, or a prompt
pub async fn login(app: &mut App, token: Option<String>) -> Result<()> {
    let token = match token.or_else(|| std::env::var("CLEARWELL_TOKEN").ok()) {
        Some(t) if !t.trim().is_empty() => t,
        _ => rpassword::prompt_password("Token: ").context("Failed to read token")?,
    };

    let token = token.trim();
    if token.is_empty() {
        return Err(anyhow::anyhow!("No token provided"));
    }

    app.login(token);

    match app.session.role() {
        Some(role) => println!("Signed in as {}.", role),
        None => println!(
            "Signed in, but the token carries no recognized role; restricted views stay locked."
        ),
    }
    Ok(())
}

pub fn logout(app: &mut App) -> Result<()> {
    app.logout();
    println!("Signed out.");
    Ok(())
}

/// Show the current session and the claims decoded from its token
pub fn whoami(app: &App) -> Result<()> {
    if !app.session.is_authenticated() {
        println!("Not signed in.");
        return Ok(());
    }

    match app.session.claims() {
        Some(claims) => {
            println!("Signed in as {}.", claims.role);
            if let Some(ref subject) = claims.subject {
                println!("Subject: {}", subject);
            }
            if let Some(expires_at) = claims.expires_at {
                println!(
                    "Token expiry: {} (not checked locally)",
                    expires_at.format("%Y-%m-%d %H:%M UTC")
                );
            }
        }
        None => println!(
            "Signed in, but the stored token does not decode. Run login again with a fresh token."
        ),
    }
    Ok(())
}

// ===== Public Lookup Commands =====

pub async fn search(app: &App, query: &str) -> Result<()> {
    let systems = app.api.search_systems(query).await?;
    if systems.is_empty() {
        println!("No systems matched {:?}.", query);
        return Ok(());
    }

    print_system_listing(&systems);
    println!("\n{} systems found.", systems.len());
    Ok(())
}

/// Full water quality report: details, safety status, contact info.
/// System and status are fetched concurrently.
pub async fn report(app: &App, pwsid: &str) -> Result<()> {
    let (system, status) = tokio::join!(app.api.fetch_system(pwsid), app.api.fetch_status(pwsid));

    let system = match system {
        Err(e) if is_not_found(&e) => {
            return Err(anyhow::anyhow!("No water system found with id {:?}", pwsid));
        }
        other => other?,
    };

    let name = system.display_name();
    println!("{}", name);
    println!("{}", "=".repeat(name.len()));

    match status {
        Ok(status) => println!("{}", status.banner()),
        Err(e) => {
            debug!(error = %e, "Status unavailable");
            println!("Status unavailable");
        }
    }

    println!();
    println!("System Details");
    println!("  PWSID:      {}", system.pwsid);
    println!("  Location:   {}", system.location_line());
    println!("  Population: {}", system.display_population());

    println!();
    println!("Contact Information");
    print_contact_info(&system);
    Ok(())
}

pub async fn stats(app: &App) -> Result<()> {
    let stats = app.api.fetch_statistics().await?;
    println!(
        "Total systems:                      {:>10}",
        format_count(stats.total_systems)
    );
    println!(
        "Systems with health violations:     {:>10}",
        format_count(stats.total_systems_with_violations)
    );
    println!(
        "Systems with open health violations:{:>10}",
        format_count(stats.active_systems_with_violations)
    );
    Ok(())
}

/// Find the water system nearest a coordinate and report its status
pub async fn near(app: &App, lat: f64, lon: f64) -> Result<()> {
    let system = match app.api.fetch_nearest_system(lat, lon).await {
        Err(e) if is_not_found(&e) => {
            return Err(anyhow::anyhow!(
                "No water system near ({}, {}); the point may be outside the covered area",
                lat,
                lon
            ));
        }
        other => other?,
    };

    println!(
        "Nearest system: {} ({})",
        system.display_name(),
        system.pwsid
    );
    println!("Location: {}", system.location_line());

    match app.api.fetch_status(&system.pwsid).await {
        Ok(status) => println!("Status: {}", status.banner()),
        Err(e) => {
            debug!(error = %e, "Status unavailable");
            println!("Status unavailable");
        }
    }
    Ok(())
}

pub async fn violations(app: &App, pwsid: &str) -> Result<()> {
    let violations = app.api.fetch_violations(pwsid).await?;
    if violations.is_empty() {
        println!("No violations recorded for {}.", pwsid);
        return Ok(());
    }

    print_violation_table(&violations);
    println!("\n{} violations recorded.", violations.len());
    Ok(())
}

// ===== Restricted Views =====

/// Operator dashboard: system summary plus its violation history.
/// An explicitly passed system is remembered as the default for next time.
pub async fn dashboard(app: &mut App, system: Option<String>) -> Result<()> {
    if !enter_view(app, View::Dashboard).await? {
        return Ok(());
    }

    let explicit = system.is_some();
    let pwsid = system
        .or_else(|| app.config.default_system.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No system selected. Pass --system or set default_system in the config file.")
        })?;

    let (system, status, violations) = tokio::join!(
        app.api.fetch_system(&pwsid),
        app.api.fetch_status(&pwsid),
        app.api.fetch_violations(&pwsid),
    );
    let system = match system {
        Err(e) if is_not_found(&e) => {
            return Err(anyhow::anyhow!("No water system found with id {:?}", pwsid));
        }
        other => other?,
    };
    let violations = violations?;

    // Remember the system only after the fetch confirmed it exists
    if explicit && app.config.default_system.as_deref() != Some(pwsid.as_str()) {
        app.config.default_system = Some(pwsid.clone());
        if let Err(e) = app.config.save() {
            warn!(error = %e, "Failed to save default system");
        } else {
            debug!(pwsid = %pwsid, "Default system saved");
        }
    }

    println!("{} - {}", View::Dashboard.title(), system.display_name());
    match status {
        Ok(status) => println!("Current status: {}", status.banner()),
        Err(e) => {
            debug!(error = %e, "Status unavailable");
            println!("Current status: unavailable");
        }
    }

    let active: Vec<&Violation> = violations.iter().filter(|v| v.is_active()).collect();
    let health_based = active.iter().filter(|v| v.is_health_based()).count();
    let resolved = violations.len() - active.len();

    println!();
    println!(
        "Violations: {} active ({} health-based), {} resolved",
        active.len(),
        health_based,
        resolved
    );

    if !active.is_empty() {
        println!();
        println!("Active Violations");
        print_violation_rows(&active);
    }
    Ok(())
}

/// Regulator map: statewide rollup and per-system status for a search.
/// Statuses are fetched concurrently with a bounded fan-out.
pub async fn map(app: &App, query: Option<String>) -> Result<()> {
    if !enter_view(app, View::Map).await? {
        return Ok(());
    }

    let stats = app.api.fetch_statistics().await?;
    println!(
        "Statewide: {} systems, {} with open health violations",
        format_count(stats.total_systems),
        format_count(stats.active_systems_with_violations)
    );

    let Some(query) = query else {
        println!("\nPass --query to list matching systems with their current status.");
        return Ok(());
    };

    let systems = app.api.search_systems(&query).await?;
    if systems.is_empty() {
        println!("\nNo systems matched {:?}.", query);
        return Ok(());
    }

    let statuses: Vec<Result<SafetyStatus>> =
        stream::iter(systems.iter().map(|s| app.api.fetch_status(&s.pwsid)))
            .buffered(MAX_CONCURRENT_REQUESTS)
            .collect()
            .await;

    println!();
    println!(
        "{:<12} {:<width$} {}",
        "PWSID",
        "NAME",
        "STATUS",
        width = NAME_COLUMN_WIDTH
    );
    let mut flagged = 0;
    for (system, status) in systems.iter().zip(&statuses) {
        let marker = match status {
            Ok(status) => {
                if *status == SafetyStatus::NotSafe {
                    flagged += 1;
                }
                status.marker()
            }
            Err(e) => {
                debug!(pwsid = %system.pwsid, error = %e, "Status unavailable");
                "unknown"
            }
        };
        println!(
            "{:<12} {:<width$} {}",
            system.pwsid,
            truncate_string(system.display_name(), NAME_COLUMN_WIDTH),
            marker,
            width = NAME_COLUMN_WIDTH
        );
    }
    println!("\n{} of {} listed systems currently flagged.", flagged, systems.len());
    Ok(())
}

// ===== Shared Helpers =====

/// Run the guard for a restricted view.
///
/// Returns true when the view may render. A missing or unprovable role
/// is an error telling the user to sign in; a recognized but wrong role
/// falls back to the public overview.
async fn enter_view(app: &App, view: View) -> Result<bool> {
    match app.check_access(view) {
        GuardDecision::Render => Ok(true),
        GuardDecision::RedirectLogin => Err(anyhow::anyhow!(
            "The {} requires signing in. Run `clearwell login` with your token.",
            view.title()
        )),
        GuardDecision::RedirectHome => {
            println!(
                "Your role does not include the {}. Showing the public overview instead.\n",
                view.title()
            );
            stats(app).await?;
            Ok(false)
        }
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<ApiError>(), Some(ApiError::NotFound(_)))
}

fn print_system_listing(systems: &[WaterSystem]) {
    println!(
        "{:<12} {:<width$} {}",
        "PWSID",
        "NAME",
        "LOCATION",
        width = NAME_COLUMN_WIDTH
    );
    for system in systems {
        println!(
            "{:<12} {:<width$} {}",
            system.pwsid,
            truncate_string(system.display_name(), NAME_COLUMN_WIDTH),
            system.location_line(),
            width = NAME_COLUMN_WIDTH
        );
    }
}

fn print_contact_info(system: &WaterSystem) {
    let mut printed = false;
    if let Some(ref org) = system.org_name {
        println!("  Organization: {}", org);
        printed = true;
    }
    // Skip the administrator line when it repeats the organization name
    if let Some(ref admin) = system.admin_name {
        if system.org_name.as_deref() != Some(admin.as_str()) {
            println!("  Administrator: {}", admin);
            printed = true;
        }
    }
    if let Some(ref email) = system.email_addr {
        println!("  Email: {}", email);
        printed = true;
    }
    if let Some(ref phone) = system.phone_number {
        println!("  Phone: {}", format_phone(phone));
        printed = true;
    }
    if let Some(ref phone) = system.alt_phone_number {
        println!("  Alternate Phone: {}", format_phone(phone));
        printed = true;
    }
    if let Some(ref fax) = system.fax_number {
        println!("  Fax: {}", format_phone(fax));
        printed = true;
    }
    if !printed {
        println!("  No contact information available.");
    }
}

fn print_violation_table(violations: &[Violation]) {
    let refs: Vec<&Violation> = violations.iter().collect();
    print_violation_rows(&refs);
}

fn print_violation_rows(violations: &[&Violation]) {
    println!(
        "{:<12} {:<6} {:<7} {:<13} {:<13} {}",
        "ID", "CODE", "HEALTH", "BEGAN", "ENDED", "STATUS"
    );
    for violation in violations {
        println!(
            "{:<12} {:<6} {:<7} {:<13} {:<13} {}",
            violation.violation_id,
            format_optional(&violation.violation_code, "-"),
            if violation.is_health_based() { "yes" } else { "no" },
            format_date(violation.non_compl_per_begin_date, "-"),
            format_date(violation.non_compl_per_end_date, "open"),
            format_optional(&violation.violation_status, "-"),
        );
    }
}
