// File: src/names.rs
// Purpose: Well-known parameter names shared by the bridge and the portlet container

pub const PORTLET_MODE_PARAMETER: &str = "javax.portlet.faces.PortletMode";
pub const WINDOW_STATE_PARAMETER: &str = "javax.portlet.faces.WindowState";
pub const SECURE_PARAMETER: &str = "javax.portlet.faces.Secure";
pub const BACK_LINK_PARAMETER: &str = "javax.portlet.faces.BackLink";
pub const VIEW_LINK_PARAMETER: &str = "javax.portlet.faces.ViewLink";
pub const IN_PROTOCOL_RESOURCE_LINK_PARAMETER: &str = "javax.portlet.faces.InProtocolResourceLink";

pub const VIEW_ID_RENDER_PARAMETER: &str = "_facesViewIdRender";
pub const VIEW_ID_RESOURCE_PARAMETER: &str = "_facesViewIdResource";
pub const NON_FACES_VIEW_PARAMETER: &str = "_jsfBridgeNonFacesView";
pub const AJAX_REDIRECT_PARAMETER: &str = "_bridgeAjaxRedirect";

/// Request parameter and header that mark a JSF partial (ajax) request
pub const PARTIAL_AJAX_PARAMETER: &str = "javax.faces.partial.ajax";
pub const FACES_REQUEST_HEADER: &str = "faces-request";

/// Serialized view state; never carried over from the ambient render parameters
pub const VIEW_STATE_PARAMETER: &str = "javax.faces.ViewState";
