// File: src/context.rs
// Purpose: Per-request context threaded through every encode call

use crate::names;
use crate::parameters::ParameterTable;
use bridge_uri::PortletPhase;
use std::collections::HashMap;

/// Answers which life-cycle phase the current request is in
pub trait PhaseOracle {
    fn current_phase(&self) -> PortletPhase;

    /// Whether the request updates part of a view (JSF ajax)
    fn is_partial_request(&self) -> bool;
}

/// Request context passed to the encoders
#[derive(Debug, Clone)]
pub struct BridgeContext {
    /// Phase of the portlet request being processed
    pub phase: PortletPhase,

    /// View id of the view currently being rendered
    pub view_id: Option<String>,

    /// Context path of the active request (e.g., "/app")
    pub request_context_path: String,

    /// Request headers, keyed by lowercase name
    pub headers: HashMap<String, String>,

    /// Parameters of the incoming request
    pub request_parameters: ParameterTable,

    /// Render parameters the container currently holds for this portlet
    pub render_parameters: ParameterTable,

    /// Portlet modes the container accepts for this portlet
    pub allowed_modes: Vec<String>,

    /// Window states the container accepts for this portlet
    pub allowed_window_states: Vec<String>,
}

impl BridgeContext {
    /// Create a new request context for `phase`
    pub fn new(phase: PortletPhase) -> Self {
        Self {
            phase,
            view_id: None,
            request_context_path: String::new(),
            headers: HashMap::new(),
            request_parameters: ParameterTable::new(),
            render_parameters: ParameterTable::new(),
            allowed_modes: vec!["view".into(), "edit".into(), "help".into()],
            allowed_window_states: vec!["normal".into(), "maximized".into(), "minimized".into()],
        }
    }

    pub fn with_view_id(mut self, view_id: impl Into<String>) -> Self {
        self.view_id = Some(view_id.into());
        self
    }

    pub fn with_context_path(mut self, context_path: impl Into<String>) -> Self {
        self.request_context_path = context_path.into();
        self
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_request_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_parameters.append(name, value);
        self
    }

    pub fn with_render_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.render_parameters.append(name, value);
        self
    }

    /// Get a header value
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn view_id(&self) -> Option<&str> {
        self.view_id.as_deref()
    }

    pub fn is_portlet_mode_allowed(&self, mode: &str) -> bool {
        self.allowed_modes.iter().any(|m| m.eq_ignore_ascii_case(mode))
    }

    pub fn is_window_state_allowed(&self, window_state: &str) -> bool {
        self.allowed_window_states
            .iter()
            .any(|s| s.eq_ignore_ascii_case(window_state))
    }
}

impl PhaseOracle for BridgeContext {
    fn current_phase(&self) -> PortletPhase {
        self.phase
    }

    /// Returns true if:
    /// - Header `Faces-Request: partial/ajax` is present
    /// - Request parameter `javax.faces.partial.ajax=true` is present
    fn is_partial_request(&self) -> bool {
        if self.get_header(names::FACES_REQUEST_HEADER) == Some("partial/ajax") {
            return true;
        }

        self.request_parameters
            .get(names::PARTIAL_AJAX_PARAMETER)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_case_insensitive() {
        let ctx = BridgeContext::new(PortletPhase::Render).with_header("Faces-Request", "partial/ajax");
        assert_eq!(ctx.get_header("faces-request"), Some("partial/ajax"));
        assert_eq!(ctx.get_header("FACES-REQUEST"), Some("partial/ajax"));
    }

    #[test]
    fn test_partial_request_by_header() {
        let ctx = BridgeContext::new(PortletPhase::Resource).with_header("Faces-Request", "partial/ajax");
        assert!(ctx.is_partial_request());
    }

    #[test]
    fn test_partial_request_by_parameter() {
        let ctx = BridgeContext::new(PortletPhase::Action)
            .with_request_parameter("javax.faces.partial.ajax", "true");
        assert!(ctx.is_partial_request());
    }

    #[test]
    fn test_full_request() {
        let ctx = BridgeContext::new(PortletPhase::Action)
            .with_header("Accept", "text/html")
            .with_request_parameter("javax.faces.partial.ajax", "false");
        assert!(!ctx.is_partial_request());
        assert_eq!(ctx.current_phase(), PortletPhase::Action);
    }

    #[test]
    fn test_allowed_modes_and_states() {
        let ctx = BridgeContext::new(PortletPhase::Render);
        assert!(ctx.is_portlet_mode_allowed("EDIT"));
        assert!(!ctx.is_portlet_mode_allowed("config"));
        assert!(ctx.is_window_state_allowed("maximized"));
        assert!(!ctx.is_window_state_allowed("fullscreen"));
    }
}
