use std::fmt;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{auth::Session, routes::table::RouteTable};

/// Route name the `auth` guard sends anonymous visitors to.
pub const LOGIN_ROUTE: &str = "login";
/// Route name the `verified` guard sends unverified users to.
pub const VERIFICATION_NOTICE_ROUTE: &str = "verification.notice";
/// Route name the `guest` guard sends signed-in users to.
pub const DASHBOARD_ROUTE: &str = "dashboard";

/// Guard
///
/// A named precondition checked before a page renders. Each guard is a pure
/// predicate over the resolved session; the route table is only consulted to
/// turn the guard's redirect route name into a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Guard {
    /// A user must be signed in.
    Auth,
    /// The signed-in user must have verified their email address.
    Verified,
    /// Nobody may be signed in.
    Guest,
}

/// Result of evaluating one guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Pass,
    Deny { redirect: Option<String> },
}

/// The first guard that failed for a request, with its redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardRejection {
    pub guard: Guard,
    pub redirect: Option<String>,
}

impl Guard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Guard::Auth => "auth",
            Guard::Verified => "verified",
            Guard::Guest => "guest",
        }
    }

    /// check
    ///
    /// Evaluates the guard against the session. On denial the redirect target is the
    /// path of the guard's redirect route, or `None` if that route is not registered.
    pub fn check(&self, session: &Session, routes: &RouteTable) -> GuardOutcome {
        let passes = match self {
            Guard::Auth => session.user().is_some(),
            Guard::Verified => session.user().is_some_and(|user| user.email_verified),
            Guard::Guest => session.user().is_none(),
        };

        if passes {
            GuardOutcome::Pass
        } else {
            GuardOutcome::Deny {
                redirect: routes.url_for(self.redirect_route()).map(str::to_string),
            }
        }
    }

    /// Name of the route a rejected visitor is sent to.
    pub fn redirect_route(&self) -> &'static str {
        match self {
            Guard::Auth => LOGIN_ROUTE,
            Guard::Verified => VERIFICATION_NOTICE_ROUTE,
            Guard::Guest => DASHBOARD_ROUTE,
        }
    }

    /// Status used when no redirect is possible, or the client asked for JSON.
    pub fn failure_status(&self) -> StatusCode {
        match self {
            Guard::Auth => StatusCode::UNAUTHORIZED,
            Guard::Verified | Guard::Guest => StatusCode::FORBIDDEN,
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs `guards` in order and stops at the first denial.
pub fn run_guards(
    guards: &[Guard],
    session: &Session,
    routes: &RouteTable,
) -> Result<(), GuardRejection> {
    for guard in guards {
        if let GuardOutcome::Deny { redirect } = guard.check(session, routes) {
            return Err(GuardRejection {
                guard: *guard,
                redirect,
            });
        }
    }
    Ok(())
}
