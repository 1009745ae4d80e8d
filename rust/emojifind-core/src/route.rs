//! Base-path aware routes
//!
//! The app lives under a configurable base path. `/` shows the browse and
//! search view; `/<percent-encoded id>` shows the details of one emoji.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Where a pathname leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum Route {
    Home,
    Details { index: usize },
    /// Unknown id, the caller redirects home
    NotFound,
}

/// Join a path onto the base, e.g. `with_base("/app/", "/x")` is `/app/x`
pub fn with_base(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}/{}", base, path)
}

/// Path relative to the base; empty for the base itself
pub fn from_base<'a>(base: &str, pathname: &'a str) -> &'a str {
    let mut base = base.to_string();
    if !base.starts_with('/') {
        base.insert(0, '/');
    }
    if !base.ends_with('/') {
        base.push('/');
    }

    if pathname == base || pathname == &base[..base.len() - 1] {
        return "";
    }
    if let Some(rest) = pathname.strip_prefix(base.as_str()) {
        return rest;
    }
    pathname.strip_prefix('/').unwrap_or(pathname)
}

/// Path of the details view for an emoji id
pub fn details_path(base: &str, id: &str) -> String {
    with_base(base, &urlencoding::encode(id))
}

pub fn resolve_route(catalog: &Catalog, base: &str, pathname: &str) -> Route {
    let relative = from_base(base, pathname);
    if relative.is_empty() {
        return Route::Home;
    }
    let id = urlencoding::decode(relative)
        .map(|id| id.into_owned())
        .unwrap_or_else(|_| relative.to_string());
    match catalog.index_of_id(&id) {
        Some(index) => Route::Details { index },
        None => {
            tracing::debug!(id = %id, "unknown emoji id in path");
            Route::NotFound
        }
    }
}
