//! The application shell: a single static route and its page metadata.

use thiserror::Error;

/// Pages the shell can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// The rich-text editor with its toolbar.
    #[default]
    Home,
}

/// Static metadata for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static str,
    pub canonical: &'static str,
}

impl Page {
    pub const fn meta(self) -> PageMeta {
        match self {
            Self::Home => HOME_META,
        }
    }
}

const HOME_META: PageMeta = PageMeta {
    title: "Urupemba-v0 - Feed for showcasing your projects.",
    description: "Urupemba is a platform to receive academic projects.",
    keywords: "office dashboard",
    canonical: "https://urubempa.ifal.edu.br",
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches '{0}'")]
    NotFound(String),
}

/// An exact-match route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub page: Page,
}

/// The shell's route table.
pub const ROUTES: &[Route] = &[Route {
    path: "/",
    page: Page::Home,
}];

/// The default route.
pub const DEFAULT_ROUTE: &str = "/";

/// Resolve `path` against [`ROUTES`]. Matching is exact.
///
/// # Errors
///
/// Returns [`RouteError::NotFound`] when no route matches.
pub fn resolve(path: &str) -> Result<Page, RouteError> {
    ROUTES
        .iter()
        .find(|route| route.path == path)
        .map(|route| route.page)
        .ok_or_else(|| RouteError::NotFound(path.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_resolves_home() {
        assert_eq!(resolve("/"), Ok(Page::Home));
        assert_eq!(resolve(DEFAULT_ROUTE), Ok(Page::Home));
    }

    #[test]
    fn test_routes_match_exactly() {
        assert_eq!(
            resolve("/home"),
            Err(RouteError::NotFound("/home".to_string()))
        );
        assert!(resolve("").is_err());
        assert!(resolve("//").is_err());
    }

    #[test]
    fn test_home_meta() {
        let meta = Page::Home.meta();
        assert_eq!(meta.title, "Urupemba-v0 - Feed for showcasing your projects.");
        assert_eq!(
            meta.description,
            "Urupemba is a platform to receive academic projects."
        );
        assert_eq!(meta.keywords, "office dashboard");
        assert_eq!(meta.canonical, "https://urubempa.ifal.edu.br");
    }

    #[test]
    fn test_route_error_message() {
        let err = resolve("/x").unwrap_err();
        assert_eq!(err.to_string(), "No route matches '/x'");
    }
}
