/// Path utilities for context paths and relative targets
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Marker a path-relative target starts with
pub const PARENT_MARKER: &str = "../";

/// Normalize a context path to canonical form
///
/// Returns `Cow::Borrowed` when input is already canonical.
///
/// # Rules
///
/// - The root context is the empty string (`""` and `"/"` both map to it)
/// - Otherwise the path starts with `/` and does not end with `/`
/// - Backslashes are treated as separators
///
/// # Examples
///
/// ```
/// use bridge_uri::path::normalize_context_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_context_path("/app"), Cow::Borrowed("/app")));
/// assert_eq!(normalize_context_path("app/"), "/app");
/// assert_eq!(normalize_context_path("/"), "");
/// ```
pub fn normalize_context_path(context_path: &str) -> Cow<'_, str> {
    if context_path.is_empty()
        || (context_path.starts_with('/')
            && !context_path.ends_with('/')
            && !context_path.contains("//")
            && !context_path.contains('\\'))
    {
        return Cow::Borrowed(context_path);
    }

    let normalized = context_path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Whether an absolute `path` lives under `context_path`
///
/// # Examples
///
/// ```
/// use bridge_uri::path::is_within_context;
///
/// assert!(is_within_context("/app/views/a.xhtml", "/app"));
/// assert!(is_within_context("/app", "/app"));
/// assert!(!is_within_context("/application/x", "/app"));
/// assert!(is_within_context("/anything", ""));
/// ```
pub fn is_within_context(path: &str, context_path: &str) -> bool {
    let context_path = normalize_context_path(context_path);
    if context_path.is_empty() {
        return true;
    }

    match path.strip_prefix(context_path.as_ref()) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Removes the context path prefix from `path`
///
/// Paths outside the context are returned unchanged.
///
/// # Examples
///
/// ```
/// use bridge_uri::path::context_relative_path;
///
/// assert_eq!(context_relative_path("/app/res/a.png", "/app"), "/res/a.png");
/// assert_eq!(context_relative_path("/other/a.png", "/app"), "/other/a.png");
/// assert_eq!(context_relative_path("/app", "/app"), "/");
/// ```
pub fn context_relative_path<'p>(path: &'p str, context_path: &str) -> &'p str {
    if !is_within_context(path, context_path) {
        return path;
    }

    let context_path = normalize_context_path(context_path);
    match &path[context_path.len()..] {
        "" => "/",
        rest => rest,
    }
}

/// Strips every leading `../` from a path-relative target
///
/// # Examples
///
/// ```
/// use bridge_uri::path::strip_parent_segments;
///
/// assert_eq!(strip_parent_segments("../../img/a.png"), "img/a.png");
/// assert_eq!(strip_parent_segments("img/a.png"), "img/a.png");
/// ```
pub fn strip_parent_segments(path: &str) -> &str {
    let mut rest = path;
    while let Some(stripped) = rest.strip_prefix(PARENT_MARKER) {
        rest = stripped;
    }
    rest
}
