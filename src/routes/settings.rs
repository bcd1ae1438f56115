use crate::guards::Guard;

use super::table::RouteEntry;

/// Account settings pages. Only the page renders live here; the forms post to
/// the account service.
pub fn settings_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::get("settings/profile", "settings/Profile", "profile.edit")
            .guarded(&[Guard::Auth]),
        RouteEntry::get("settings/password", "settings/Password", "password.edit")
            .guarded(&[Guard::Auth]),
        RouteEntry::get("settings/appearance", "settings/Appearance", "appearance")
            .guarded(&[Guard::Auth]),
    ]
}
