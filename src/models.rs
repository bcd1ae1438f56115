use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::guards::Guard;

// --- Persistence Schemas ---

/// User
///
/// The account record read from the `users` table while resolving a session.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    // NULL until the user follows the verification link.
    #[ts(type = "string | null")]
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

// --- Page Payloads (Inertia wire format) ---

/// PageObject
///
/// What the front end boots from: the component to mount, its props, the visited URL
/// and the asset version the server is running. Sent as JSON on Inertia visits and
/// embedded in the HTML shell on first load.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct PageObject {
    pub component: String,
    pub props: PageProps,
    pub url: String,
    pub version: String,
}

/// Props shared with every page. Routes contribute none of their own.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct PageProps {
    pub name: String,
    pub auth: AuthProps,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq, Default)]
#[ts(export)]
pub struct AuthProps {
    pub user: Option<UserProfile>,
}

/// UserProfile
///
/// The public view of the signed-in user handed to the front end.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, PartialEq)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub email_verified: bool,
}

// --- Route Manifest ---

/// RouteManifest
///
/// Response body of `GET /api/routes`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteManifest {
    pub routes: Vec<RouteDescriptor>,
}

/// One named route as seen by the front end.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RouteDescriptor {
    pub name: String,
    pub uri: String,
    pub methods: Vec<String>,
    pub guards: Vec<Guard>,
}
