/// Router Module Index
///
/// Page routes are declared as plain data (`RouteEntry`) in the group modules and
/// merged into one immutable `RouteTable` at startup. The dispatcher consults that
/// table for every request the service surface in `public` does not claim.

/// The route table itself: entries, matching and reverse lookup.
pub mod table;

/// Landing pages and the cipher workbenches.
pub mod web;

/// Account settings pages.
pub mod settings;

/// Sign-in, registration and email verification pages.
pub mod auth;

/// Service endpoints (health, route manifest). No guards applied.
pub mod public;

use crate::error::RouteTableError;
use table::RouteTable;

/// Builds the table served by the application: web, settings and auth groups, in that order.
pub fn route_table() -> Result<RouteTable, RouteTableError> {
    RouteTable::builder()
        .routes(web::web_routes())
        .routes(settings::settings_routes())
        .routes(auth::auth_routes())
        .build()
}
