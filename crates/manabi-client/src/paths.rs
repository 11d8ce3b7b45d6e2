//! Public endpoint allow-list.
//!
//! Matching is exact on the normalized path: `/auth/login` is public,
//! `/auth/login-history` and `/admin/auth/login` are not.

const AUTH_PREFIX: &str = "/auth";

/// Endpoints reachable without a credential.
pub const DEFAULT_PUBLIC_PATHS: [&str; 7] = [
    "/auth/register",
    "/auth/login",
    "/auth/verify-email",
    "/auth/resend-otp",
    "/auth/forgot-password",
    "/auth/reset-password",
    "/auth/refresh-token",
];

/// Path of the token refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPaths {
    paths: Vec<String>,
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PATHS)
    }
}

impl PublicPaths {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Self { paths: Vec::new() };
        for path in paths {
            out.insert(path.as_ref());
        }
        out
    }

    /// No public paths: every request carries the credential.
    #[must_use]
    pub const fn none() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn insert(&mut self, path: &str) {
        let path = normalize(path);
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        let path = normalize(path);
        self.paths.iter().any(|p| *p == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

/// Whether `path` belongs to the authentication API (`/auth` or below).
///
/// A 401 from these endpoints means bad credentials, never an expired token.
#[must_use]
pub fn is_auth_endpoint(path: &str) -> bool {
    let path = normalize(path);
    path == AUTH_PREFIX
        || path
            .strip_prefix(AUTH_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Strip scheme/host, query and fragment; ensure a leading slash; drop
/// trailing slashes.
#[must_use]
pub fn normalize(path: &str) -> String {
    let without_origin = match path.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |idx| &rest[idx..]),
        None => path,
    };
    let end = without_origin
        .find(['?', '#'])
        .unwrap_or(without_origin.len());
    let trimmed = without_origin[..end].trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
