use std::collections::HashMap;

use axum::http::Method;

use crate::{error::RouteTableError, guards::Guard};

/// RouteEntry
///
/// A single path-to-page binding. Entries are immutable once constructed; the only
/// way to obtain one is through the constructors below, and the table never hands
/// out mutable references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    method: Method,
    path: String,
    page: String,
    guards: Vec<Guard>,
    name: String,
}

impl RouteEntry {
    /// Declares a `GET` route rendering `page`. `HEAD` requests are answered by the same entry.
    pub fn get(path: &str, page: &str, name: &str) -> Self {
        Self {
            method: Method::GET,
            path: normalize_path(path),
            page: page.to_string(),
            guards: Vec::new(),
            name: name.to_string(),
        }
    }

    /// Attaches guards, evaluated in the given order.
    pub fn guarded(mut self, guards: &[Guard]) -> Self {
        self.guards.extend_from_slice(guards);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Why a request did not match any entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMiss {
    /// No entry is registered for the path under any method.
    NotFound,
    /// The path exists, but only under the listed methods.
    MethodNotAllowed(Vec<Method>),
}

/// RouteTable
///
/// The complete, validated set of page routes. Built once at startup through
/// [`RouteTable::builder`] and shared read-only afterwards.
#[derive(Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_route: HashMap<(Method, String), usize>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// match_route
    ///
    /// Selects the entry for `(method, path)`. The path is normalised the same way
    /// declared paths are, so trailing slashes are ignored.
    pub fn match_route(&self, method: &Method, path: &str) -> Result<&RouteEntry, RouteMiss> {
        let path = normalize_path(path);

        if let Some(entry) = self.lookup(method, &path) {
            return Ok(entry);
        }
        if *method == Method::HEAD {
            if let Some(entry) = self.lookup(&Method::GET, &path) {
                return Ok(entry);
            }
        }

        let mut allowed: Vec<Method> = self
            .entries
            .iter()
            .filter(|entry| entry.path == path)
            .map(|entry| entry.method.clone())
            .collect();

        if allowed.is_empty() {
            return Err(RouteMiss::NotFound);
        }
        if allowed.contains(&Method::GET) && !allowed.contains(&Method::HEAD) {
            allowed.push(Method::HEAD);
        }
        Err(RouteMiss::MethodNotAllowed(allowed))
    }

    /// Reverse lookup: the path registered under `name`.
    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&index| self.entries[index].path.as_str())
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<&RouteEntry> {
        self.by_route
            .get(&(method.clone(), path.to_string()))
            .map(|&index| &self.entries[index])
    }
}

/// RouteTableBuilder
///
/// Collects entries from each route group and validates them as a whole.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
}

impl RouteTableBuilder {
    /// Appends a group of entries (e.g. the web, settings or auth routes).
    pub fn routes(mut self, entries: impl IntoIterator<Item = RouteEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Validates uniqueness of names and of `(method, path)` pairs.
    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let mut by_route = HashMap::with_capacity(self.entries.len());
        let mut by_name = HashMap::with_capacity(self.entries.len());

        for (index, entry) in self.entries.iter().enumerate() {
            if by_name.insert(entry.name.clone(), index).is_some() {
                return Err(RouteTableError::DuplicateName(entry.name.clone()));
            }
            let key = (entry.method.clone(), entry.path.clone());
            if by_route.insert(key, index).is_some() {
                return Err(RouteTableError::DuplicatePath {
                    method: entry.method.clone(),
                    path: entry.path.clone(),
                });
            }
        }

        Ok(RouteTable {
            entries: self.entries,
            by_route,
            by_name,
        })
    }
}

/// Canonical form of a path: one leading slash, no trailing slash, `/` for the root.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}
