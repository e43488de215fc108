// File: src/base_url.rs
// Purpose: The encoded URL variants an encoder returns

use crate::context::BridgeContext;
use crate::parameters::ParameterTable;
use crate::portlet_url::PortletUrl;
use bridge_uri::path::strip_parent_segments;

/// Capabilities shared by every encoded URL
pub trait BaseUrl {
    /// Wire form of the URL
    fn to_url_string(&self) -> String;

    fn parameters(&self) -> &ParameterTable;

    fn set_parameter(&mut self, name: &str, values: Vec<String>);
}

/// A string URL handed back unmodified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEncodedString {
    url: String,
    parameters: ParameterTable,
}

impl NonEncodedString {
    pub fn new(url: impl Into<String>, parameters: ParameterTable) -> Self {
        Self {
            url: url.into(),
            parameters,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl BaseUrl for NonEncodedString {
    fn to_url_string(&self) -> String {
        self.url.clone()
    }

    fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    fn set_parameter(&mut self, name: &str, values: Vec<String>) {
        self.parameters.put(name, values);
    }
}

/// A string URL passed through the container's response encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedExternalString {
    url: String,
    encoded: String,
    parameters: ParameterTable,
}

impl EncodedExternalString {
    pub fn new(url: impl Into<String>, encoded: impl Into<String>, parameters: ParameterTable) -> Self {
        Self {
            url: url.into(),
            encoded: encoded.into(),
            parameters,
        }
    }

    /// The URL before response encoding
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl BaseUrl for EncodedExternalString {
    fn to_url_string(&self) -> String {
        self.encoded.clone()
    }

    fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    fn set_parameter(&mut self, name: &str, values: Vec<String>) {
        self.parameters.put(name, values);
    }
}

/// A `../` relative URL re-rooted at the request context path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeString {
    url: String,
    context_path: String,
    parameters: ParameterTable,
}

impl RelativeString {
    pub fn new(url: impl Into<String>, context_path: impl Into<String>, parameters: ParameterTable) -> Self {
        Self {
            url: url.into(),
            context_path: context_path.into(),
            parameters,
        }
    }

    pub fn context_path(&self) -> &str {
        &self.context_path
    }
}

impl BaseUrl for RelativeString {
    /// ```
    /// use bridge_url::{BaseUrl, ParameterTable, RelativeString};
    ///
    /// let url = RelativeString::new("../img/a.png", "/app", ParameterTable::new());
    /// assert_eq!(url.to_url_string(), "/app/img/a.png");
    /// ```
    fn to_url_string(&self) -> String {
        format!(
            "{}/{}",
            self.context_path.trim_end_matches('/'),
            strip_parent_segments(&self.url)
        )
    }

    fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    fn set_parameter(&mut self, name: &str, values: Vec<String>) {
        self.parameters.put(name, values);
    }
}

/// Action URL navigating to another Faces view with mode, state and security
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacesTargetAction {
    url: PortletUrl,
    portlet_mode: Option<String>,
    window_state: Option<String>,
    secure: bool,
}

impl FacesTargetAction {
    /// Applies mode, window state and security to `url` right away
    pub fn new(
        ctx: &BridgeContext,
        mut url: PortletUrl,
        portlet_mode: Option<String>,
        window_state: Option<String>,
        secure: bool,
    ) -> Self {
        apply_portlet_mode(ctx, &mut url, portlet_mode.as_deref());
        apply_window_state(ctx, &mut url, window_state.as_deref());
        url.set_secure(secure);
        Self {
            url,
            portlet_mode,
            window_state,
            secure,
        }
    }

    pub fn url(&self) -> &PortletUrl {
        &self.url
    }

    /// Requested mode, as carried by the target
    pub fn portlet_mode(&self) -> Option<&str> {
        self.portlet_mode.as_deref()
    }

    pub fn window_state(&self) -> Option<&str> {
        self.window_state.as_deref()
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }
}

impl BaseUrl for FacesTargetAction {
    fn to_url_string(&self) -> String {
        self.url.to_url_string()
    }

    fn parameters(&self) -> &ParameterTable {
        self.url.parameters()
    }

    fn set_parameter(&mut self, name: &str, values: Vec<String>) {
        self.url.set_parameter(name, values);
    }
}

/// Render URL asking the portlet to dispatch to a non-Faces resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFacesTargetRender {
    url: PortletUrl,
    portlet_mode: Option<String>,
    window_state: Option<String>,
    secure: bool,
    dispatch_path: String,
}

impl NonFacesTargetRender {
    /// Applies mode, window state and security, and stores the dispatch path
    /// under `dispatch_parameter`
    pub fn new(
        ctx: &BridgeContext,
        mut url: PortletUrl,
        portlet_mode: Option<String>,
        window_state: Option<String>,
        secure: bool,
        dispatch_parameter: &str,
        dispatch_path: impl Into<String>,
    ) -> Self {
        let dispatch_path = dispatch_path.into();
        apply_portlet_mode(ctx, &mut url, portlet_mode.as_deref());
        apply_window_state(ctx, &mut url, window_state.as_deref());
        url.set_secure(secure);
        url.parameters_mut().set(dispatch_parameter, dispatch_path.as_str());
        Self {
            url,
            portlet_mode,
            window_state,
            secure,
            dispatch_path,
        }
    }

    pub fn url(&self) -> &PortletUrl {
        &self.url
    }

    pub fn portlet_mode(&self) -> Option<&str> {
        self.portlet_mode.as_deref()
    }

    pub fn window_state(&self) -> Option<&str> {
        self.window_state.as_deref()
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn dispatch_path(&self) -> &str {
        &self.dispatch_path
    }
}

impl BaseUrl for NonFacesTargetRender {
    fn to_url_string(&self) -> String {
        self.url.to_url_string()
    }

    fn parameters(&self) -> &ParameterTable {
        self.url.parameters()
    }

    fn set_parameter(&mut self, name: &str, values: Vec<String>) {
        self.url.set_parameter(name, values);
    }
}

/// Exactly one of these is produced per encode call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedUrl {
    NonEncoded(NonEncodedString),
    EncodedExternal(EncodedExternalString),
    Relative(RelativeString),
    Action(PortletUrl),
    Render(PortletUrl),
    Resource(PortletUrl),
    FacesTargetAction(FacesTargetAction),
    NonFacesTargetRender(NonFacesTargetRender),
}

impl EncodedUrl {
    /// Wraps a container URL in the variant matching its phase
    pub fn from_portlet_url(url: PortletUrl) -> Self {
        match url.phase() {
            bridge_uri::PortletPhase::Action => EncodedUrl::Action(url),
            bridge_uri::PortletPhase::Render => EncodedUrl::Render(url),
            bridge_uri::PortletPhase::Resource => EncodedUrl::Resource(url),
        }
    }

    /// Short name of the variant, for logs and diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            EncodedUrl::NonEncoded(_) => "non-encoded",
            EncodedUrl::EncodedExternal(_) => "encoded-external",
            EncodedUrl::Relative(_) => "relative",
            EncodedUrl::Action(_) => "action",
            EncodedUrl::Render(_) => "render",
            EncodedUrl::Resource(_) => "resource",
            EncodedUrl::FacesTargetAction(_) => "faces-target-action",
            EncodedUrl::NonFacesTargetRender(_) => "non-faces-target-render",
        }
    }

    /// The container URL behind this variant, if any
    pub fn portlet_url(&self) -> Option<&PortletUrl> {
        match self {
            EncodedUrl::Action(url) | EncodedUrl::Render(url) | EncodedUrl::Resource(url) => Some(url),
            EncodedUrl::FacesTargetAction(action) => Some(action.url()),
            EncodedUrl::NonFacesTargetRender(render) => Some(render.url()),
            _ => None,
        }
    }

    fn as_base_url(&self) -> &dyn BaseUrl {
        match self {
            EncodedUrl::NonEncoded(url) => url,
            EncodedUrl::EncodedExternal(url) => url,
            EncodedUrl::Relative(url) => url,
            EncodedUrl::Action(url) | EncodedUrl::Render(url) | EncodedUrl::Resource(url) => url,
            EncodedUrl::FacesTargetAction(url) => url,
            EncodedUrl::NonFacesTargetRender(url) => url,
        }
    }

    fn as_base_url_mut(&mut self) -> &mut dyn BaseUrl {
        match self {
            EncodedUrl::NonEncoded(url) => url,
            EncodedUrl::EncodedExternal(url) => url,
            EncodedUrl::Relative(url) => url,
            EncodedUrl::Action(url) | EncodedUrl::Render(url) | EncodedUrl::Resource(url) => url,
            EncodedUrl::FacesTargetAction(url) => url,
            EncodedUrl::NonFacesTargetRender(url) => url,
        }
    }
}

impl BaseUrl for PortletUrl {
    fn to_url_string(&self) -> String {
        PortletUrl::to_url_string(self)
    }

    fn parameters(&self) -> &ParameterTable {
        PortletUrl::parameters(self)
    }

    fn set_parameter(&mut self, name: &str, values: Vec<String>) {
        PortletUrl::set_parameter(self, name, values);
    }
}

impl BaseUrl for EncodedUrl {
    fn to_url_string(&self) -> String {
        self.as_base_url().to_url_string()
    }

    fn parameters(&self) -> &ParameterTable {
        self.as_base_url().parameters()
    }

    fn set_parameter(&mut self, name: &str, values: Vec<String>) {
        self.as_base_url_mut().set_parameter(name, values);
    }
}

impl std::fmt::Display for EncodedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_url_string())
    }
}

/// Sets the mode on an action or render URL if the container allows it
pub(crate) fn apply_portlet_mode(ctx: &BridgeContext, url: &mut PortletUrl, mode: Option<&str>) {
    let Some(mode) = mode.filter(|m| !m.is_empty()) else {
        return;
    };
    if !ctx.is_portlet_mode_allowed(mode) {
        tracing::warn!("Ignoring portlet mode not allowed by the container: mode=[{}]", mode);
        return;
    }
    url.set_portlet_mode(mode);
}

/// Sets the window state on an action or render URL if the container allows it
pub(crate) fn apply_window_state(ctx: &BridgeContext, url: &mut PortletUrl, window_state: Option<&str>) {
    let Some(window_state) = window_state.filter(|s| !s.is_empty()) else {
        return;
    };
    if !ctx.is_window_state_allowed(window_state) {
        tracing::warn!(
            "Ignoring window state not allowed by the container: windowState=[{}]",
            window_state
        );
        return;
    }
    url.set_window_state(window_state);
}
