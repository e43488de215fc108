// File: src/portlet_url.rs
// Purpose: Container URL handle for the action, render and resource phases

use crate::parameters::ParameterTable;
use bridge_uri::PortletPhase;

/// A URL owned by the portlet container
///
/// Mode and window state only apply to action and render URLs; a resource
/// URL carries a resource id instead. Every handle can be marked secure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortletUrl {
    phase: PortletPhase,
    portal_url: String,
    portlet_id: String,
    namespace: String,
    parameters: ParameterTable,
    portlet_mode: Option<String>,
    window_state: Option<String>,
    secure: bool,
    resource_id: Option<String>,
}

impl PortletUrl {
    pub fn new(
        phase: PortletPhase,
        portal_url: impl Into<String>,
        portlet_id: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        let namespace = namespace.into();
        Self {
            phase,
            portal_url: portal_url.into(),
            portlet_id: portlet_id.into(),
            parameters: ParameterTable::with_namespace(namespace.clone()),
            namespace,
            portlet_mode: None,
            window_state: None,
            secure: false,
            resource_id: None,
        }
    }

    pub fn phase(&self) -> PortletPhase {
        self.phase
    }

    /// Action and render URLs; these accept mode and window state
    pub fn is_portlet_url(&self) -> bool {
        self.phase != PortletPhase::Resource
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterTable {
        &mut self.parameters
    }

    pub fn set_parameter(&mut self, name: &str, values: Vec<String>) {
        self.parameters.put(name, values);
    }

    pub fn portlet_mode(&self) -> Option<&str> {
        self.portlet_mode.as_deref()
    }

    /// Returns false, leaving the URL unchanged, on a resource URL
    pub fn set_portlet_mode(&mut self, mode: impl Into<String>) -> bool {
        if !self.is_portlet_url() {
            return false;
        }
        self.portlet_mode = Some(mode.into());
        true
    }

    pub fn window_state(&self) -> Option<&str> {
        self.window_state.as_deref()
    }

    /// Returns false, leaving the URL unchanged, on a resource URL
    pub fn set_window_state(&mut self, window_state: impl Into<String>) -> bool {
        if !self.is_portlet_url() {
            return false;
        }
        self.window_state = Some(window_state.into());
        true
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn set_secure(&mut self, secure: bool) {
        self.secure = secure;
    }

    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    pub fn set_resource_id(&mut self, resource_id: impl Into<String>) {
        self.resource_id = Some(resource_id.into());
    }

    /// Wire form: `p_p_*` container parameters, then namespaced portlet parameters
    ///
    /// ```
    /// use bridge_url::PortletUrl;
    /// use bridge_uri::PortletPhase;
    ///
    /// let mut url = PortletUrl::new(PortletPhase::Render, "/web/guest/home", "p1", "_p1_");
    /// url.set_window_state("maximized");
    /// url.parameters_mut().set("page", "2");
    /// assert_eq!(
    ///     url.to_url_string(),
    ///     "/web/guest/home?p_p_id=p1&p_p_lifecycle=0&p_p_state=maximized&_p1_page=2"
    /// );
    /// ```
    pub fn to_url_string(&self) -> String {
        let mut pairs: Vec<(String, String)> = vec![
            ("p_p_id".into(), self.portlet_id.clone()),
            ("p_p_lifecycle".into(), self.phase.lifecycle_id().into()),
        ];
        if let Some(state) = &self.window_state {
            pairs.push(("p_p_state".into(), state.clone()));
        }
        if let Some(mode) = &self.portlet_mode {
            pairs.push(("p_p_mode".into(), mode.clone()));
        }
        if let Some(resource_id) = &self.resource_id {
            pairs.push(("p_p_resource_id".into(), resource_id.clone()));
        }
        for (name, value) in self.parameters.pairs() {
            let name = if name.starts_with(&self.namespace) {
                name.to_string()
            } else {
                format!("{}{}", self.namespace, name)
            };
            pairs.push((name, value.to_string()));
        }

        let base = match self.portal_url.strip_prefix("http://") {
            Some(rest) if self.secure => format!("https://{}", rest),
            _ => self.portal_url.clone(),
        };
        format!("{}?{}", base, bridge_uri::encode_query(pairs))
    }
}

impl std::fmt::Display for PortletUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_url_string())
    }
}
