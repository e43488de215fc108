// File: src/rules.rs
// Purpose: Ordered classification rules for resource URL encoding

use crate::base_url::EncodedUrl;
use crate::context::BridgeContext;
use crate::error::Result;
use crate::factory::UrlFactory;
use crate::resource_url::{self, BridgeResourceUrl};

/// Facts about a target that drive classification
///
/// Computed once from the parsed target, its parameters and the encoder flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlTraits {
    pub opaque: bool,
    pub portlet_scheme: bool,
    pub resource_marker: bool,
    pub resource_encoded: bool,
    pub external: bool,
    pub path_relative: bool,
    pub view_link: bool,
    pub faces_target: bool,
    pub in_protocol: bool,
}

/// Which encoding a target receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `portlet:action|render|resource` → container URL of that phase
    PortletScheme,
    /// `mailto:`, `javascript:` and other opaque targets → verbatim
    OpaqueString,
    /// JSF resource URL that was already encoded → verbatim
    EncodedFacesResource,
    /// JSF resource URL → container resource URL
    FacesResource,
    /// Outside the application → response-encoded string
    External,
    /// `../` → re-rooted at the request context path
    Relative,
    /// View link → action URL for Faces views, render URL otherwise
    ViewLink,
    /// Another Faces view → container resource URL
    FacesView,
    /// Non-Faces resource served through the portlet → resource URL with id
    InProtocol,
    /// Anything else → response-encoded string
    ExternalResource,
}

pub(crate) type Handler = fn(&BridgeResourceUrl<'_>, &EncodeEnv<'_>) -> Result<EncodedUrl>;

/// Collaborators a handler may call
pub(crate) struct EncodeEnv<'e> {
    pub ctx: &'e BridgeContext,
    pub factory: &'e dyn UrlFactory,
}

/// A `(predicate, handler)` pair
pub struct Rule {
    pub strategy: Strategy,
    pub applies: fn(&UrlTraits) -> bool,
    pub(crate) encode: Handler,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("strategy", &self.strategy).finish()
    }
}

/// Classification chain, first match wins
///
/// # Rules (evaluated in order)
///
/// 1. Opaque `portlet:` target
/// 2. Any other opaque target
/// 3. Resource marker, already encoded
/// 4. Resource marker
/// 5. External target
/// 6. Path-relative target
/// 7. View link
/// 8. Target naming a Faces view
/// 9. In-protocol resource
/// 10. Everything else
pub static RULES: [Rule; 10] = [
    Rule {
        strategy: Strategy::PortletScheme,
        applies: |t| t.opaque && t.portlet_scheme,
        encode: resource_url::encode_portlet_scheme,
    },
    Rule {
        strategy: Strategy::OpaqueString,
        applies: |t| t.opaque,
        encode: resource_url::encode_verbatim,
    },
    Rule {
        strategy: Strategy::EncodedFacesResource,
        applies: |t| t.resource_marker && t.resource_encoded,
        encode: resource_url::encode_verbatim,
    },
    Rule {
        strategy: Strategy::FacesResource,
        applies: |t| t.resource_marker,
        encode: resource_url::encode_faces_resource,
    },
    Rule {
        strategy: Strategy::External,
        applies: |t| t.external,
        encode: resource_url::encode_external,
    },
    Rule {
        strategy: Strategy::Relative,
        applies: |t| t.path_relative,
        encode: resource_url::encode_relative,
    },
    Rule {
        strategy: Strategy::ViewLink,
        applies: |t| t.view_link,
        encode: resource_url::encode_view_link,
    },
    Rule {
        strategy: Strategy::FacesView,
        applies: |t| t.faces_target,
        encode: resource_url::encode_faces_view,
    },
    Rule {
        strategy: Strategy::InProtocol,
        applies: |t| t.in_protocol,
        encode: resource_url::encode_in_protocol,
    },
    Rule {
        strategy: Strategy::ExternalResource,
        applies: |_| true,
        encode: resource_url::encode_external,
    },
];

/// First rule whose predicate holds for `traits`
pub fn classify(traits: &UrlTraits) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.applies)(traits))
}
