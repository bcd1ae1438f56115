use axum::http::Method;
use cipher_portal::{
    RouteTableError,
    guards::Guard,
    routes::{
        route_table,
        table::{RouteEntry, RouteMiss, RouteTable, normalize_path},
    },
};
use std::collections::HashSet;

const PUBLIC_PAGES: &[(&str, &str)] = &[("/", "Welcome"), ("/about", "About"), ("/team", "Team")];

const PROTECTED_PAGES: &[(&str, &str, &str)] = &[
    ("/dashboard", "Dashboard", "dashboard"),
    ("/caesar", "CaesarCipher", "cipher.caesar"),
    ("/monoalphabetic", "MonoalphabeticCipher", "monoalphabetic"),
    ("/playfair", "PlayfairCipher", "playfair"),
    ("/vegenere", "VeginereCipher", "vigenere"),
    ("/hillcipher", "HillCipher", "hillcipher"),
    ("/beaufort", "BeaufortCipher", "beaufort"),
    ("/autokey", "AutokeyCipher", "autokey"),
    ("/homophonic", "HomophonicCipher", "homophonic"),
    ("/affine", "AffineCipher", "affine"),
    ("/atbash", "AtbashCipher", "atbash"),
    ("/scytale", "ScytaleCipher", "scytale"),
    ("/columnar", "ColumnarCipher", "columnar"),
    ("/ciphervideos", "CipherVideos", "ciphervideo"),
    ("/jamoa", "Jamoa", "jamoa"),
];

#[test]
fn test_application_table_builds() {
    let table = route_table().expect("declared routes must be valid");
    // 18 web pages, 3 settings pages, 5 auth pages.
    assert_eq!(table.len(), 26);
    assert!(table.entries().iter().all(|entry| *entry.method() == Method::GET));
}

#[test]
fn test_public_pages_have_no_guards() {
    let table = route_table().unwrap();

    for (path, page) in PUBLIC_PAGES {
        let entry = table.match_route(&Method::GET, path).unwrap();
        assert_eq!(entry.page(), *page);
        assert!(entry.guards().is_empty(), "{path} must be public");
    }
}

#[test]
fn test_cipher_pages_require_auth_then_verified() {
    let table = route_table().unwrap();

    for (path, page, name) in PROTECTED_PAGES {
        let entry = table.match_route(&Method::GET, path).unwrap();
        assert_eq!(entry.page(), *page);
        assert_eq!(entry.name(), *name);
        assert_eq!(entry.guards(), &[Guard::Auth, Guard::Verified], "{path}");
    }
}

#[test]
fn test_every_name_round_trips_to_its_path() {
    let table = route_table().unwrap();
    let mut seen_paths = HashSet::new();

    for entry in table.entries() {
        let path = table.url_for(entry.name()).unwrap();
        assert_eq!(path, entry.path());
        let matched = table.match_route(entry.method(), path).unwrap();
        assert_eq!(matched.name(), entry.name());
        assert!(seen_paths.insert(path.to_string()), "{path} registered twice");
    }
}

#[test]
fn test_reverse_lookup_of_known_names() {
    let table = route_table().unwrap();

    assert_eq!(table.url_for("home"), Some("/"));
    assert_eq!(table.url_for("cipher.caesar"), Some("/caesar"));
    assert_eq!(table.url_for("vigenere"), Some("/vegenere"));
    assert_eq!(table.url_for("login"), Some("/login"));
    assert_eq!(table.url_for("verification.notice"), Some("/verify-email"));
    assert_eq!(table.url_for("no.such.route"), None);
}

#[test]
fn test_unknown_path_is_not_found() {
    let table = route_table().unwrap();

    assert_eq!(
        table.match_route(&Method::GET, "/enigma"),
        Err(RouteMiss::NotFound)
    );
    assert_eq!(
        table.match_route(&Method::POST, "/enigma"),
        Err(RouteMiss::NotFound)
    );
}

#[test]
fn test_known_path_with_wrong_method() {
    let table = route_table().unwrap();

    match table.match_route(&Method::POST, "/caesar") {
        Err(RouteMiss::MethodNotAllowed(allowed)) => {
            assert!(allowed.contains(&Method::GET));
            assert!(allowed.contains(&Method::HEAD));
        }
        other => panic!("expected MethodNotAllowed, got {other:?}"),
    }
}

#[test]
fn test_head_is_served_by_get_entry() {
    let table = route_table().unwrap();
    let entry = table.match_route(&Method::HEAD, "/about").unwrap();
    assert_eq!(entry.page(), "About");
}

#[test]
fn test_trailing_slash_and_missing_leading_slash_match() {
    let table = route_table().unwrap();

    assert_eq!(
        table.match_route(&Method::GET, "/caesar/").unwrap().page(),
        "CaesarCipher"
    );
    assert_eq!(
        table.match_route(&Method::GET, "caesar").unwrap().page(),
        "CaesarCipher"
    );
    // Paths are case sensitive.
    assert_eq!(
        table.match_route(&Method::GET, "/Caesar"),
        Err(RouteMiss::NotFound)
    );
}

#[test]
fn test_normalize_path() {
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("dashboard"), "/dashboard");
    assert_eq!(normalize_path("/settings/profile/"), "/settings/profile");
}

#[test]
fn test_duplicate_name_is_rejected() {
    let result = RouteTable::builder()
        .routes(vec![
            RouteEntry::get("/a", "A", "same"),
            RouteEntry::get("/b", "B", "same"),
        ])
        .build();

    assert_eq!(
        result.unwrap_err(),
        RouteTableError::DuplicateName("same".to_string())
    );
}

#[test]
fn test_duplicate_path_is_rejected_after_normalisation() {
    let result = RouteTable::builder()
        .routes(vec![RouteEntry::get("/a", "A", "first")])
        .routes(vec![RouteEntry::get("a/", "A2", "second")])
        .build();

    assert_eq!(
        result.unwrap_err(),
        RouteTableError::DuplicatePath {
            method: Method::GET,
            path: "/a".to_string(),
        }
    );
}

#[test]
fn test_groups_keep_registration_order() {
    let table = route_table().unwrap();
    let names: Vec<&str> = table.entries().iter().map(|entry| entry.name()).collect();

    assert_eq!(names.first(), Some(&"home"));
    assert_eq!(names[17], "team");
    assert_eq!(names[18], "profile.edit");
    assert_eq!(names.last(), Some(&"password.confirm"));
}
