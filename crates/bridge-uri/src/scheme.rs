/// Scheme detection for navigation targets
///
/// Pure functions that split a raw target into its scheme and the rest,
/// and map the scheme-specific part of a `portlet:` target to a phase.

use once_cell::sync::Lazy;
use regex::Regex;

/// The scheme used by view authors to address the portlet container directly
pub const PORTLET_SCHEME: &str = "portlet";

// RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
static SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("valid scheme regex"));

/// Portlet life-cycle phase a URL is addressed to
///
/// # Examples
///
/// ```
/// use bridge_uri::PortletPhase;
///
/// assert_eq!(PortletPhase::Action.lifecycle_id(), "1");
/// assert_eq!("resource".parse::<PortletPhase>(), Ok(PortletPhase::Resource));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortletPhase {
    Action,
    Render,
    Resource,
}

impl PortletPhase {
    /// Numeric life-cycle id used on the wire (`p_p_lifecycle`)
    pub fn lifecycle_id(self) -> &'static str {
        match self {
            PortletPhase::Render => "0",
            PortletPhase::Action => "1",
            PortletPhase::Resource => "2",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PortletPhase::Action => "action",
            PortletPhase::Render => "render",
            PortletPhase::Resource => "resource",
        }
    }
}

impl std::fmt::Display for PortletPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PortletPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "action" => Ok(PortletPhase::Action),
            "render" => Ok(PortletPhase::Render),
            "resource" => Ok(PortletPhase::Resource),
            other => Err(format!("unknown portlet phase: {}", other)),
        }
    }
}

/// Splits `raw` into `(scheme, rest)` when it starts with a URI scheme
///
/// # Examples
///
/// ```
/// use bridge_uri::scheme::split_scheme;
///
/// assert_eq!(split_scheme("portlet:render?a=b"), Some(("portlet", "render?a=b")));
/// assert_eq!(split_scheme("http://host/x"), Some(("http", "//host/x")));
/// assert_eq!(split_scheme("/views/a.xhtml"), None);
/// ```
pub fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let caps = SCHEME_RE.captures(raw)?;
    let scheme = caps.get(1)?;
    Some((scheme.as_str(), &raw[scheme.end() + 1..]))
}

/// Maps the scheme-specific part of a `portlet:` target to a phase
///
/// # Rules (evaluated in order)
///
/// 1. `action...` → [`PortletPhase::Action`]
/// 2. `resource...` → [`PortletPhase::Resource`]
/// 3. anything else (`render`, a bare view name) → [`PortletPhase::Render`]
///
/// # Examples
///
/// ```
/// use bridge_uri::scheme::classify_phase;
/// use bridge_uri::PortletPhase;
///
/// assert_eq!(classify_phase("action?x=1"), PortletPhase::Action);
/// assert_eq!(classify_phase("resource"), PortletPhase::Resource);
/// assert_eq!(classify_phase("viewA?mode=edit"), PortletPhase::Render);
/// ```
pub fn classify_phase(scheme_specific: &str) -> PortletPhase {
    let head = scheme_specific
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if head.starts_with("action") {
        PortletPhase::Action
    } else if head.starts_with("resource") {
        PortletPhase::Resource
    } else {
        PortletPhase::Render
    }
}
