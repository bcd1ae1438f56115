use crate::guards::{Guard, LOGIN_ROUTE, VERIFICATION_NOTICE_ROUTE};

use super::table::RouteEntry;

/// Authentication Pages
///
/// Sign-in, registration and verification screens. Guests see the sign-in pages;
/// signed-in users are bounced to the dashboard by the `guest` guard. Credential
/// handling itself belongs to the identity provider.
///
/// `login` and `verification.notice` are the redirect targets of the `auth` and
/// `verified` guards, so removing them turns those redirects into plain 401/403s.
pub fn auth_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::get("register", "auth/Register", "register").guarded(&[Guard::Guest]),
        RouteEntry::get("login", "auth/Login", LOGIN_ROUTE).guarded(&[Guard::Guest]),
        RouteEntry::get("forgot-password", "auth/ForgotPassword", "password.request")
            .guarded(&[Guard::Guest]),
        RouteEntry::get("verify-email", "auth/VerifyEmail", VERIFICATION_NOTICE_ROUTE)
            .guarded(&[Guard::Auth]),
        RouteEntry::get("confirm-password", "auth/ConfirmPassword", "password.confirm")
            .guarded(&[Guard::Auth]),
    ]
}
