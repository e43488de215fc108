// File: src/resource_url.rs
// Purpose: Resource URL encoder - classifies a target and builds its encoded form

use crate::base_url::{
    apply_portlet_mode, apply_window_state, EncodedExternalString, EncodedUrl, FacesTargetAction,
    NonEncodedString, NonFacesTargetRender, RelativeString,
};
use crate::config::BridgeConfig;
use crate::context::BridgeContext;
use crate::encoding::encode_component;
use crate::error::{BridgeError, Result};
use crate::factory::UrlFactory;
use crate::names;
use crate::parameters::ParameterTable;
use crate::portlet_url::PortletUrl;
use crate::rules::{self, EncodeEnv, UrlTraits};
use crate::url_base::{to_boolean, UrlBase};
use crate::view::ViewResolver;
use bridge_uri::{BridgeUri, PortletPhase};

/// Encoder for targets handed to `encodeResourceURL`-style calls
///
/// Holds the parsed target, its parameter table and two flags: `view_link`
/// (navigate to the target as a view) and `in_protocol` (serve the target
/// through a container resource URL). Both flags are also picked up from
/// their marker parameters, which are removed from the table.
pub struct BridgeResourceUrl<'a> {
    base: UrlBase<'a>,
    resolver: &'a dyn ViewResolver,
    view_link: bool,
    in_protocol: bool,
}

impl<'a> BridgeResourceUrl<'a> {
    pub fn parse(raw: &str, config: &'a BridgeConfig, resolver: &'a dyn ViewResolver) -> Result<Self> {
        Self::new(raw, None, config, resolver)
    }

    /// Parses `raw` and merges `overrides` over its query parameters
    pub fn new(
        raw: &str,
        overrides: Option<&ParameterTable>,
        config: &'a BridgeConfig,
        resolver: &'a dyn ViewResolver,
    ) -> Result<Self> {
        let mut base = UrlBase::new(raw, overrides, config, Some(resolver))?;
        let names = &config.parameters;
        let view_link = take_flag(&mut base.parameters, &names.view_link);
        let in_protocol = take_flag(&mut base.parameters, &names.in_protocol);

        Ok(Self {
            base,
            resolver,
            view_link,
            in_protocol,
        })
    }

    pub fn uri(&self) -> &BridgeUri {
        &self.base.uri
    }

    pub fn parameters(&self) -> &ParameterTable {
        &self.base.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterTable {
        &mut self.base.parameters
    }

    /// View id the target names, if any
    pub fn view_target(&self) -> Option<&str> {
        self.base.view_target.as_deref()
    }

    pub fn is_view_link(&self) -> bool {
        self.view_link
    }

    pub fn set_view_link(&mut self, view_link: bool) {
        self.view_link = view_link;
    }

    pub fn is_in_protocol(&self) -> bool {
        self.in_protocol
    }

    pub fn set_in_protocol(&mut self, in_protocol: bool) {
        self.in_protocol = in_protocol;
    }

    pub fn is_self_referencing(&self, ctx: &BridgeContext) -> bool {
        self.base.is_self_referencing(self.resolver, ctx)
    }

    /// Classification facts for this target
    pub fn traits(&self) -> UrlTraits {
        let uri = &self.base.uri;
        UrlTraits {
            opaque: uri.is_opaque(),
            portlet_scheme: uri.is_portlet_scheme(),
            resource_marker: uri.has_resource_marker(),
            resource_encoded: uri.is_resource_encoded(),
            external: uri.is_external(&self.base.config.portlet.context_path),
            path_relative: uri.is_path_relative(),
            view_link: self.view_link,
            faces_target: self.base.view_target.is_some(),
            in_protocol: self.in_protocol,
        }
    }

    /// Replaces the back-link parameter with the encoded action URL of the current view
    ///
    /// The value of the back-link marker names the parameter to write; a bare
    /// marker reuses its own key. Returns the `(key, value)` written.
    pub fn replace_back_link_parameter(
        &mut self,
        ctx: &BridgeContext,
        factory: &dyn UrlFactory,
    ) -> Result<(String, String)> {
        let config = self.base.config;
        let view_id = self.resolver.current_view(ctx).unwrap_or_default();
        let action_url = self.resolver.action_url(ctx, view_id);
        let encoded_action_url = factory.encode_action_url(ctx, &action_url)?;

        let value = match encode_component(&encoded_action_url, &config.encoding.charset) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Unable to encode back link: {}", e);
                String::new()
            }
        };

        let key = match self.base.parameters.take(&config.parameters.back_link) {
            Some((removed_key, values)) => values
                .into_iter()
                .find(|v| !v.is_empty())
                .unwrap_or(removed_key),
            None => config.parameters.back_link.clone(),
        };

        tracing::debug!("Replaced back link: key=[{}] viewId=[{}]", key, view_id);
        self.base.parameters.set(key.as_str(), value.as_str());
        Ok((key, value))
    }

    /// Runs the classification chain and builds the matching encoded URL
    pub fn to_encoded_url(&self, ctx: &BridgeContext, factory: &dyn UrlFactory) -> Result<EncodedUrl> {
        if self.base.is_empty_target() {
            return Ok(EncodedUrl::NonEncoded(self.base.empty_target_url()));
        }

        let traits = self.traits();
        let rule = rules::classify(&traits).ok_or_else(|| {
            BridgeError::MalformedTarget(format!("no encoding rule matches [{}]", self.base.uri))
        })?;

        tracing::debug!(strategy = ?rule.strategy, "Encoding resource url=[{}]", self.base.uri);
        (rule.encode)(self, &EncodeEnv { ctx, factory })
    }
}

/// Encodes `raw` as a resource URL, replacing its back-link parameter first
///
/// ```
/// use bridge_url::{encode_resource_url, BaseUrl, BridgeConfig, BridgeContext, PortalUrlFactory, ServletMappingResolver};
/// use bridge_uri::PortletPhase;
///
/// let config = BridgeConfig::default().with_context_path("/app");
/// let resolver = ServletMappingResolver::from_config(&config);
/// let factory = PortalUrlFactory::from_config(&config);
/// let ctx = BridgeContext::new(PortletPhase::Render).with_context_path("/app");
///
/// let url = encode_resource_url("mailto:a@b.c", &config, &resolver, &ctx, &factory).unwrap();
/// assert_eq!(url.to_url_string(), "mailto:a@b.c");
/// ```
pub fn encode_resource_url(
    raw: &str,
    config: &BridgeConfig,
    resolver: &dyn ViewResolver,
    ctx: &BridgeContext,
    factory: &dyn UrlFactory,
) -> Result<EncodedUrl> {
    let mut url = BridgeResourceUrl::parse(raw, config, resolver)?;
    if url.parameters().contains(&config.parameters.back_link) {
        url.replace_back_link_parameter(ctx, factory)?;
    }
    url.to_encoded_url(ctx, factory)
}

/// Removes a marker parameter; a bare marker or a truthy value sets the flag
fn take_flag(parameters: &mut ParameterTable, name: &str) -> bool {
    parameters
        .take(name)
        .is_some_and(|(_, values)| values.first().map_or(true, |v| v.is_empty() || to_boolean(v)))
}

/// Copies ambient render parameters the URL does not already carry, except the view state
fn copy_render_parameters(ctx: &BridgeContext, url: &mut PortletUrl) {
    for (name, values) in ctx.render_parameters.iter() {
        if name != names::VIEW_STATE_PARAMETER && !url.parameters().contains(name) {
            url.set_parameter(name, values.to_vec());
        }
    }
}

fn create_for_phase(env: &EncodeEnv<'_>, phase: PortletPhase, target: &str) -> Result<PortletUrl> {
    match phase {
        PortletPhase::Action => env.factory.create_action_url(env.ctx, target),
        PortletPhase::Render => env.factory.create_render_url(env.ctx, target),
        PortletPhase::Resource => env.factory.create_resource_url(env.ctx, target),
    }
}

// Rule handlers, in chain order

pub(crate) fn encode_portlet_scheme(url: &BridgeResourceUrl<'_>, env: &EncodeEnv<'_>) -> Result<EncodedUrl> {
    let base = &url.base;
    let names = &base.config.parameters;
    let portlet_mode = base.parameter(&names.portlet_mode);
    let window_state = base.parameter(&names.window_state);
    let secure = base.parameter(&names.secure);

    let phase = base.uri.portlet_phase().unwrap_or(PortletPhase::Render);
    let view_id_parameter = match phase {
        PortletPhase::Resource => names.view_id_resource.as_str(),
        _ => base.view_id_parameter.as_str(),
    };
    let target = base.to_target_string_as(&names.reserved(), view_id_parameter);
    let mut portlet_url = create_for_phase(env, phase, &target)?;

    if url.is_self_referencing(env.ctx) {
        copy_render_parameters(env.ctx, &mut portlet_url);
    }

    if portlet_url.is_portlet_url() {
        apply_portlet_mode(env.ctx, &mut portlet_url, portlet_mode);
        apply_window_state(env.ctx, &mut portlet_url, window_state);
    }

    if let Some(secure) = secure {
        portlet_url.set_secure(to_boolean(secure));
    }

    Ok(EncodedUrl::from_portlet_url(portlet_url))
}

pub(crate) fn encode_verbatim(url: &BridgeResourceUrl<'_>, _env: &EncodeEnv<'_>) -> Result<EncodedUrl> {
    Ok(EncodedUrl::NonEncoded(NonEncodedString::new(
        url.base.uri.as_str(),
        url.base.parameters.clone(),
    )))
}

pub(crate) fn encode_faces_resource(url: &BridgeResourceUrl<'_>, env: &EncodeEnv<'_>) -> Result<EncodedUrl> {
    let resource_url = env
        .factory
        .create_resource_url(env.ctx, &url.base.merged_string())?;
    Ok(EncodedUrl::Resource(resource_url))
}

pub(crate) fn encode_external(url: &BridgeResourceUrl<'_>, env: &EncodeEnv<'_>) -> Result<EncodedUrl> {
    let merged = url.base.merged_string();
    let encoded = env.factory.encode_url(env.ctx, &merged);
    Ok(EncodedUrl::EncodedExternal(EncodedExternalString::new(
        merged,
        encoded,
        url.base.parameters.clone(),
    )))
}

pub(crate) fn encode_relative(url: &BridgeResourceUrl<'_>, env: &EncodeEnv<'_>) -> Result<EncodedUrl> {
    Ok(EncodedUrl::Relative(RelativeString::new(
        url.base.merged_string(),
        env.ctx.request_context_path.as_str(),
        url.base.parameters.clone(),
    )))
}

pub(crate) fn encode_view_link(url: &BridgeResourceUrl<'_>, env: &EncodeEnv<'_>) -> Result<EncodedUrl> {
    let base = &url.base;
    let names = &base.config.parameters;
    let portlet_mode = base.parameter(&names.portlet_mode).map(str::to_string);
    let window_state = base.parameter(&names.window_state).map(str::to_string);
    let secure = base.parameter(&names.secure).is_some_and(to_boolean);
    let target = base.to_target_string(&names.reserved());

    if base.view_target.is_some() {
        let action_url = env.factory.create_action_url(env.ctx, &target)?;
        return Ok(EncodedUrl::FacesTargetAction(FacesTargetAction::new(
            env.ctx,
            action_url,
            portlet_mode,
            window_state,
            secure,
        )));
    }

    let render_url = env.factory.create_render_url(env.ctx, &target)?;
    Ok(EncodedUrl::NonFacesTargetRender(NonFacesTargetRender::new(
        env.ctx,
        render_url,
        portlet_mode,
        window_state,
        secure,
        &names.non_faces_view,
        base.uri.path(),
    )))
}

pub(crate) fn encode_faces_view(url: &BridgeResourceUrl<'_>, env: &EncodeEnv<'_>) -> Result<EncodedUrl> {
    let base = &url.base;
    let target = base.to_target_string(&base.config.parameters.reserved());
    let resource_url = env.factory.create_resource_url(env.ctx, &target)?;
    Ok(EncodedUrl::Resource(resource_url))
}

pub(crate) fn encode_in_protocol(url: &BridgeResourceUrl<'_>, env: &EncodeEnv<'_>) -> Result<EncodedUrl> {
    let base = &url.base;
    let mut resource_url = env
        .factory
        .create_resource_url(env.ctx, &base.to_target_string(&[]))?;
    resource_url.set_resource_id(base.uri.context_relative_path(&base.config.portlet.context_path));
    Ok(EncodedUrl::Resource(resource_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::PortalUrlFactory;
    use crate::rules::Strategy;
    use crate::view::ServletMappingResolver;
    use pretty_assertions::assert_eq;

    fn config() -> BridgeConfig {
        BridgeConfig::default().with_context_path("/app")
    }

    fn strategy(url: &BridgeResourceUrl<'_>) -> Strategy {
        rules::classify(&url.traits()).map(|rule| rule.strategy).unwrap()
    }

    #[test]
    fn test_markers_become_flags() {
        let config = config();
        let resolver = ServletMappingResolver::from_config(&config);
        let url = BridgeResourceUrl::parse(
            "/app/nonFaces.jsp?javax.portlet.faces.ViewLink=true&x=1",
            &config,
            &resolver,
        )
        .unwrap();

        assert!(url.is_view_link());
        assert!(!url.parameters().contains("javax.portlet.faces.ViewLink"));
        assert_eq!(strategy(&url), Strategy::ViewLink);
    }

    #[test]
    fn test_false_marker_is_stripped_but_unset() {
        let config = config();
        let resolver = ServletMappingResolver::from_config(&config);
        let url = BridgeResourceUrl::parse(
            "/app/a.png?javax.portlet.faces.InProtocolResourceLink=false",
            &config,
            &resolver,
        )
        .unwrap();

        assert!(!url.is_in_protocol());
        assert!(url.parameters().is_empty());
    }

    #[test]
    fn test_setters_drive_classification() {
        let config = config();
        let resolver = ServletMappingResolver::from_config(&config);
        let mut url = BridgeResourceUrl::parse("/app/img/a.png", &config, &resolver).unwrap();
        assert_eq!(strategy(&url), Strategy::ExternalResource);

        url.set_in_protocol(true);
        assert_eq!(strategy(&url), Strategy::InProtocol);
    }

    #[test]
    fn test_back_link_reuses_key_of_bare_marker() {
        let config = config();
        let resolver = ServletMappingResolver::from_config(&config);
        let factory = PortalUrlFactory::from_config(&config);
        let ctx = BridgeContext::new(PortletPhase::Render)
            .with_context_path("/app")
            .with_view_id("/views/a.xhtml");
        let mut url =
            BridgeResourceUrl::parse("http://x.org/?javax.portlet.faces.BackLink", &config, &resolver).unwrap();

        let (key, value) = url.replace_back_link_parameter(&ctx, &factory).unwrap();
        assert_eq!(key, "javax.portlet.faces.BackLink");
        assert!(value.starts_with("%2Fweb%2Fguest%2Fhome%3Fp_p_id%3Dbridge_portlet"));
        assert_eq!(url.parameters().get(&key), Some(value.as_str()));
    }

    #[test]
    fn test_back_link_unsupported_charset_recovers() {
        let mut config = config();
        config.encoding.charset = "X-UNKNOWN".to_string();
        let resolver = ServletMappingResolver::from_config(&config);
        let factory = PortalUrlFactory::from_config(&config);
        let ctx = BridgeContext::new(PortletPhase::Render).with_view_id("/a.xhtml");
        let mut url =
            BridgeResourceUrl::parse("http://x.org/?javax.portlet.faces.BackLink=returnTo", &config, &resolver)
                .unwrap();

        let (key, value) = url.replace_back_link_parameter(&ctx, &factory).unwrap();
        assert_eq!(key, "returnTo");
        assert_eq!(value, "");
        assert_eq!(url.parameters().get("returnTo"), Some(""));
    }
}
