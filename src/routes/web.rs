use crate::guards::Guard;

use super::table::RouteEntry;

/// Guards shared by every cipher page: a signed-in user with a verified email.
const AUTH_VERIFIED: &[Guard] = &[Guard::Auth, Guard::Verified];

/// Web Routes
///
/// The public landing pages plus the cipher workbench pages. Every page except
/// the welcome, about and team pages requires a verified account.
pub fn web_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::get("/", "Welcome", "home"),
        RouteEntry::get("dashboard", "Dashboard", "dashboard").guarded(AUTH_VERIFIED),
        // --- Cipher workbenches ---
        RouteEntry::get("/caesar", "CaesarCipher", "cipher.caesar").guarded(AUTH_VERIFIED),
        RouteEntry::get("/monoalphabetic", "MonoalphabeticCipher", "monoalphabetic")
            .guarded(AUTH_VERIFIED),
        RouteEntry::get("playfair", "PlayfairCipher", "playfair").guarded(AUTH_VERIFIED),
        // Path and page keep their historical spellings; the route name is the corrected one.
        RouteEntry::get("/vegenere", "VeginereCipher", "vigenere").guarded(AUTH_VERIFIED),
        RouteEntry::get("hillcipher", "HillCipher", "hillcipher").guarded(AUTH_VERIFIED),
        RouteEntry::get("beaufort", "BeaufortCipher", "beaufort").guarded(AUTH_VERIFIED),
        RouteEntry::get("autokey", "AutokeyCipher", "autokey").guarded(AUTH_VERIFIED),
        RouteEntry::get("homophonic", "HomophonicCipher", "homophonic").guarded(AUTH_VERIFIED),
        RouteEntry::get("affine", "AffineCipher", "affine").guarded(AUTH_VERIFIED),
        RouteEntry::get("atbash", "AtbashCipher", "atbash").guarded(AUTH_VERIFIED),
        RouteEntry::get("scytale", "ScytaleCipher", "scytale").guarded(AUTH_VERIFIED),
        RouteEntry::get("columnar", "ColumnarCipher", "columnar").guarded(AUTH_VERIFIED),
        RouteEntry::get("ciphervideos", "CipherVideos", "ciphervideo").guarded(AUTH_VERIFIED),
        RouteEntry::get("jamoa", "Jamoa", "jamoa").guarded(AUTH_VERIFIED),
        // --- Public information pages ---
        RouteEntry::get("/about", "About", "about"),
        RouteEntry::get("/team", "Team", "team"),
    ]
}
