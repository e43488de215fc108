// Integration tests for the resource, redirect and partial-action encoders

use bridge_uri::PortletPhase;
use bridge_url::encoding::decode_component;
use bridge_url::{
    encode_resource_url, BaseUrl, BridgeConfig, BridgeContext, BridgeError, BridgePartialActionUrl,
    BridgeRedirectUrl, BridgeResourceUrl, EmptyTargetPolicy, EncodedUrl, ParameterTable, PortalUrlFactory,
    PortletUrl, RedirectParameters, ServletMappingResolver, UrlFactory, ViewResolver,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::cell::RefCell;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Short reserved names so targets stay readable
fn config() -> BridgeConfig {
    let mut config = BridgeConfig::default().with_context_path("/app");
    config.parameters.portlet_mode = "mode".to_string();
    config.parameters.window_state = "windowState".to_string();
    config
}

fn render_ctx() -> BridgeContext {
    BridgeContext::new(PortletPhase::Render)
        .with_context_path("/app")
        .with_view_id("/views/a.xhtml")
}

/// Portal factory that records every target handed to a `create_*` call
struct RecordingFactory {
    inner: PortalUrlFactory,
    targets: RefCell<Vec<String>>,
}

impl RecordingFactory {
    fn new(config: &BridgeConfig) -> Self {
        Self {
            inner: PortalUrlFactory::from_config(config),
            targets: RefCell::new(Vec::new()),
        }
    }

    fn targets(&self) -> Vec<String> {
        self.targets.borrow().clone()
    }
}

impl UrlFactory for RecordingFactory {
    fn create_action_url(&self, ctx: &BridgeContext, target: &str) -> bridge_url::Result<PortletUrl> {
        self.targets.borrow_mut().push(target.to_string());
        self.inner.create_action_url(ctx, target)
    }

    fn create_render_url(&self, ctx: &BridgeContext, target: &str) -> bridge_url::Result<PortletUrl> {
        self.targets.borrow_mut().push(target.to_string());
        self.inner.create_render_url(ctx, target)
    }

    fn create_resource_url(&self, ctx: &BridgeContext, target: &str) -> bridge_url::Result<PortletUrl> {
        self.targets.borrow_mut().push(target.to_string());
        self.inner.create_resource_url(ctx, target)
    }

    fn encode_action_url(&self, ctx: &BridgeContext, url: &str) -> bridge_url::Result<String> {
        self.inner.encode_action_url(ctx, url)
    }
}

fn encode(raw: &str, config: &BridgeConfig, ctx: &BridgeContext) -> EncodedUrl {
    init_tracing();
    let resolver = ServletMappingResolver::from_config(config);
    let factory = PortalUrlFactory::from_config(config);
    BridgeResourceUrl::parse(raw, config, &resolver)
        .and_then(|url| url.to_encoded_url(ctx, &factory))
        .unwrap()
}

// http(s) targets come back literally

#[rstest]
#[case("http://example.com/a?b=1")]
#[case("https://example.com/img/logo.png")]
fn test_http_target_is_returned_literally(#[case] target: &str) {
    let config = config();
    let ctx = render_ctx();
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = PortalUrlFactory::from_config(&config);

    let resource = encode(target, &config, &ctx);
    assert_eq!(resource.kind(), "encoded-external");
    assert_eq!(resource.to_url_string(), target);
    assert_eq!(encode(&resource.to_url_string(), &config, &ctx), resource);

    let partial = BridgePartialActionUrl::new(target, &config, &resolver)
        .and_then(|url| url.to_encoded_url(&ctx, &factory))
        .unwrap();
    assert_eq!(partial.kind(), "non-encoded");
    assert_eq!(partial.to_url_string(), target);

    let redirect = BridgeRedirectUrl::new(&ctx, target, None, &config)
        .and_then(|url| url.to_encoded_url(&ctx))
        .unwrap();
    assert_eq!(redirect.kind(), "non-encoded");
    assert_eq!(redirect.to_url_string(), target);
}

// portlet: scheme

#[test]
fn test_portlet_scheme_mode_is_applied_not_exported() {
    init_tracing();
    let config = config();
    let ctx = render_ctx();
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = RecordingFactory::new(&config);

    let encoded = BridgeResourceUrl::parse("portlet:viewA?mode=edit", &config, &resolver)
        .and_then(|url| url.to_encoded_url(&ctx, &factory))
        .unwrap();

    assert_eq!(encoded.kind(), "render");
    let portlet_url = encoded.portlet_url().unwrap();
    assert_eq!(portlet_url.portlet_mode(), Some("edit"));
    assert!(!encoded.parameters().contains("mode"));
    assert_eq!(factory.targets(), vec!["portlet:viewA".to_string()]);
}

#[rstest]
#[case("portlet:action", "action")]
#[case("portlet:render?x=1", "render")]
#[case("portlet:resource", "resource")]
#[case("PORTLET:Action?x=1", "action")]
fn test_portlet_scheme_phase(#[case] target: &str, #[case] kind: &str) {
    assert_eq!(encode(target, &config(), &render_ctx()).kind(), kind);
}

#[test]
fn test_portlet_resource_carries_resource_view_id() {
    let encoded = encode(
        "portlet:resource?_facesViewIdRender=/views/b.xhtml",
        &config(),
        &render_ctx(),
    );
    assert_eq!(encoded.parameters().get("_facesViewIdResource"), Some("/views/b.xhtml"));
    assert!(!encoded.parameters().contains("_facesViewIdRender"));
}

#[test]
fn test_portlet_scheme_disallowed_window_state_is_ignored() {
    let encoded = encode("portlet:render?windowState=huge", &config(), &render_ctx());
    let portlet_url = encoded.portlet_url().unwrap();
    assert_eq!(portlet_url.window_state(), None);
    assert!(!encoded.parameters().contains("windowState"));
}

#[test]
fn test_portlet_scheme_secure() {
    let config = config();
    let ctx = render_ctx();
    assert!(encode("portlet:render?javax.portlet.faces.Secure=true", &config, &ctx)
        .portlet_url()
        .unwrap()
        .is_secure());
    assert!(!encode("portlet:render?javax.portlet.faces.Secure=false", &config, &ctx)
        .portlet_url()
        .unwrap()
        .is_secure());
}

#[test]
fn test_portlet_resource_secure() {
    let encoded = encode(
        "portlet:resource?javax.portlet.faces.Secure=true",
        &config(),
        &render_ctx(),
    );
    let portlet_url = encoded.portlet_url().unwrap();

    assert_eq!(portlet_url.phase(), PortletPhase::Resource);
    assert!(portlet_url.is_secure());
    assert!(!encoded.parameters().contains("javax.portlet.faces.Secure"));
}

#[test]
fn test_resource_phase_ignores_mode() {
    let encoded = encode("portlet:resource?mode=edit", &config(), &render_ctx());
    assert_eq!(encoded.portlet_url().unwrap().portlet_mode(), None);
}

#[test]
fn test_namespaced_reserved_parameter() {
    let config = config().with_namespace("_p1_");
    let encoded = encode("portlet:render?_p1_mode=help&x=1", &config, &render_ctx());

    assert_eq!(encoded.portlet_url().unwrap().portlet_mode(), Some("help"));
    assert!(!encoded.parameters().contains("mode"));
    assert_eq!(encoded.parameters().get("x"), Some("1"));
}

#[test]
fn test_namespaced_override_replaces_target_parameter() {
    let config = config().with_namespace("_p1_");
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = PortalUrlFactory::from_config(&config);
    let overrides = ParameterTable::from_pairs([("_p1_x", "2")]);

    let url = BridgeResourceUrl::new("portlet:render?x=1", Some(&overrides), &config, &resolver).unwrap();
    assert_eq!(url.parameters().len(), 1);
    assert_eq!(url.parameters().get("x"), Some("2"));

    let wire = url.to_encoded_url(&render_ctx(), &factory).unwrap().to_url_string();
    assert_eq!(wire.matches("_p1_x=").count(), 1, "{}", wire);
    assert!(wire.contains("_p1_x=2"), "{}", wire);
}

// self-reference

#[test]
fn test_self_reference_copies_render_parameters() {
    let ctx = render_ctx()
        .with_render_parameter("bridgeRequestScopeId", "abc")
        .with_render_parameter("x", "ambient");

    let encoded = encode(
        "portlet:render?_facesViewIdRender=/views/a.xhtml&x=explicit",
        &config(),
        &ctx,
    );

    for (name, _) in ctx.render_parameters.iter() {
        assert!(encoded.parameters().contains(name), "missing {}", name);
    }
    assert_eq!(encoded.parameters().get("bridgeRequestScopeId"), Some("abc"));
    assert_eq!(encoded.parameters().get("x"), Some("explicit"));
}

#[test]
fn test_self_reference_skips_view_state() {
    let ctx = render_ctx()
        .with_render_parameter("javax.faces.ViewState", "-123:456")
        .with_render_parameter("bridgeRequestScopeId", "abc");

    let encoded = encode("portlet:render?_facesViewIdRender=/views/a.xhtml", &config(), &ctx);

    assert!(!encoded.parameters().contains("javax.faces.ViewState"));
    assert_eq!(encoded.parameters().get("bridgeRequestScopeId"), Some("abc"));
}

#[test]
fn test_other_view_does_not_copy_render_parameters() {
    let ctx = render_ctx().with_render_parameter("bridgeRequestScopeId", "abc");
    let encoded = encode("portlet:render?_facesViewIdRender=/views/b.xhtml", &config(), &ctx);
    assert!(!encoded.parameters().contains("bridgeRequestScopeId"));
}

// opaque and resource-marker targets

#[rstest]
#[case("mailto:someone@example.com?subject=hi")]
#[case("javascript:void(0)")]
fn test_opaque_target_is_verbatim(#[case] target: &str) {
    let encoded = encode(target, &config(), &render_ctx());
    assert_eq!(encoded.kind(), "non-encoded");
    assert_eq!(encoded.to_url_string(), target);
}

#[test]
fn test_encoded_faces_resource_round_trips() {
    let target = "/app/javax.faces.resource/a.css.xhtml?javax.faces.resource=a.css&ln=css";
    let encoded = encode(target, &config(), &render_ctx());

    assert_eq!(encoded.kind(), "non-encoded");
    assert_eq!(encoded.to_url_string(), target);
    assert_eq!(encode(&encoded.to_url_string(), &config(), &render_ctx()), encoded);
}

#[test]
fn test_faces_resource_becomes_resource_url() {
    let config = config();
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = RecordingFactory::new(&config);
    let target = "/app/javax.faces.resource/a.css.xhtml?ln=css";

    let encoded = BridgeResourceUrl::parse(target, &config, &resolver)
        .and_then(|url| url.to_encoded_url(&render_ctx(), &factory))
        .unwrap();

    assert_eq!(encoded.kind(), "resource");
    assert_eq!(encoded.parameters().get("ln"), Some("css"));
    assert_eq!(factory.targets(), vec![target.to_string()]);
}

// external, relative and catch-all targets

#[test]
fn test_path_outside_context_is_external() {
    let encoded = encode("/portal/img/logo.png", &config(), &render_ctx());
    assert_eq!(encoded.kind(), "encoded-external");
    assert_eq!(encoded.to_url_string(), "/portal/img/logo.png");
}

#[test]
fn test_relative_target_uses_request_context_path() {
    let ctx = render_ctx().with_context_path("/live");
    let encoded = encode("../img/a.png?v=1", &config(), &ctx);

    assert_eq!(encoded.kind(), "relative");
    assert_eq!(encoded.to_url_string(), "/live/img/a.png?v=1");
}

#[test]
fn test_unmapped_path_inside_context_falls_through() {
    let encoded = encode("/app/res/a.pdf", &config(), &render_ctx());
    assert_eq!(encoded.kind(), "encoded-external");
    assert_eq!(encoded.to_url_string(), "/app/res/a.pdf");
}

// view links

#[test]
fn test_view_link_to_unresolved_view_renders_non_faces_target() {
    let encoded = encode(
        "/app/nonFaces.jsp?javax.portlet.faces.ViewLink=true&windowState=maximized&x=1",
        &config(),
        &render_ctx(),
    );

    let EncodedUrl::NonFacesTargetRender(render) = &encoded else {
        panic!("expected a non-Faces render URL, got {}", encoded.kind());
    };
    assert_eq!(render.window_state(), Some("maximized"));
    assert_eq!(render.url().window_state(), Some("maximized"));
    assert_eq!(render.dispatch_path(), "/app/nonFaces.jsp");
    assert_eq!(encoded.parameters().get("_jsfBridgeNonFacesView"), Some("/app/nonFaces.jsp"));
    assert_eq!(encoded.parameters().get("x"), Some("1"));
    assert!(!encoded.parameters().contains("windowState"));
    assert!(!encoded.parameters().contains("javax.portlet.faces.ViewLink"));
}

#[test]
fn test_view_link_to_faces_view_is_action() {
    let encoded = encode(
        "/app/views/b.xhtml?javax.portlet.faces.ViewLink=true&mode=edit&javax.portlet.faces.Secure=yes",
        &config(),
        &render_ctx(),
    );

    let EncodedUrl::FacesTargetAction(action) = &encoded else {
        panic!("expected a Faces action URL, got {}", encoded.kind());
    };
    assert_eq!(action.url().portlet_mode(), Some("edit"));
    assert!(action.is_secure());
    assert_eq!(encoded.parameters().get("_facesViewIdRender"), Some("/views/b.xhtml"));
    assert!(!encoded.parameters().contains("mode"));
}

#[test]
fn test_view_link_with_invalid_mode_keeps_request_but_not_url_mode() {
    let encoded = encode(
        "/app/views/b.xhtml?javax.portlet.faces.ViewLink=true&mode=bogus",
        &config(),
        &render_ctx(),
    );

    let EncodedUrl::FacesTargetAction(action) = &encoded else {
        panic!("expected a Faces action URL, got {}", encoded.kind());
    };
    assert_eq!(action.portlet_mode(), Some("bogus"));
    assert_eq!(action.url().portlet_mode(), None);
}

// Faces views and in-protocol resources

#[test]
fn test_faces_view_becomes_resource_url_without_reserved_parameters() {
    let config = config();
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = RecordingFactory::new(&config);

    let encoded = BridgeResourceUrl::parse("/app/views/b.xhtml?mode=edit&x=1", &config, &resolver)
        .and_then(|url| url.to_encoded_url(&render_ctx(), &factory))
        .unwrap();

    assert_eq!(encoded.kind(), "resource");
    assert_eq!(
        factory.targets(),
        vec!["/app/views/b.xhtml?x=1&_facesViewIdRender=%2Fviews%2Fb.xhtml".to_string()]
    );
}

#[test]
fn test_in_protocol_resource_sets_resource_id() {
    let config = config();
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = PortalUrlFactory::from_config(&config);

    let mut url = BridgeResourceUrl::parse("/app/res/a.pdf?v=2", &config, &resolver).unwrap();
    url.set_in_protocol(true);
    let encoded = url.to_encoded_url(&render_ctx(), &factory).unwrap();

    assert_eq!(encoded.kind(), "resource");
    assert_eq!(encoded.portlet_url().unwrap().resource_id(), Some("/res/a.pdf"));
    assert_eq!(encoded.parameters().get("v"), Some("2"));
}

// back link

#[test]
fn test_back_link_round_trip() {
    init_tracing();
    let config = config();
    let ctx = render_ctx();
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = PortalUrlFactory::from_config(&config);

    let encoded = encode_resource_url(
        "http://x.org/page?javax.portlet.faces.BackLink=returnTo",
        &config,
        &resolver,
        &ctx,
        &factory,
    )
    .unwrap();

    let canonical = factory
        .encode_action_url(&ctx, &resolver.action_url(&ctx, "/views/a.xhtml"))
        .unwrap();
    let value = encoded.parameters().get("returnTo").unwrap();
    assert_eq!(decode_component(value).unwrap(), canonical);
    assert!(!encoded.parameters().contains("javax.portlet.faces.BackLink"));
    assert!(encoded.to_url_string().starts_with("http://x.org/page?returnTo="));
}

// redirect and partial action

#[rstest]
#[case(render_ctx().with_header("Faces-Request", "partial/ajax"))]
#[case(render_ctx().with_request_parameter("javax.faces.partial.ajax", "true"))]
fn test_partial_redirect_carries_ajax_marker(#[case] ctx: BridgeContext) {
    let config = config();
    let encoded = BridgeRedirectUrl::new(&ctx, "/app/views/b.xhtml", None, &config)
        .and_then(|url| url.to_encoded_url(&ctx))
        .unwrap();

    assert_eq!(encoded.parameters().get("_bridgeAjaxRedirect"), Some("true"));
    assert_eq!(encoded.to_url_string(), "/app/views/b.xhtml?_bridgeAjaxRedirect=true");
}

#[rstest]
#[case(PortletPhase::Action)]
#[case(PortletPhase::Render)]
fn test_plain_redirect_has_no_ajax_marker(#[case] phase: PortletPhase) {
    let config = config();
    let ctx = BridgeContext::new(phase);
    let mut params = RedirectParameters::new();
    params.insert("x".to_string(), Some(vec!["1".to_string()]));

    let encoded = BridgeRedirectUrl::new(&ctx, "/app/views/b.xhtml", Some(&params), &config)
        .and_then(|url| url.to_encoded_url(&ctx))
        .unwrap();

    assert!(!encoded.parameters().contains("_bridgeAjaxRedirect"));
    assert_eq!(encoded.to_url_string(), "/app/views/b.xhtml?x=1");
}

#[test]
fn test_partial_action_uses_resource_view_id_parameter() {
    let config = config();
    let resolver = ServletMappingResolver::from_config(&config);
    let factory = RecordingFactory::new(&config);
    let ctx = BridgeContext::new(PortletPhase::Resource).with_context_path("/app");

    let encoded = BridgePartialActionUrl::new("/app/views/b.xhtml?x=1", &config, &resolver)
        .and_then(|url| url.to_encoded_url(&ctx, &factory))
        .unwrap();

    assert_eq!(encoded.kind(), "action");
    assert_eq!(
        factory.targets(),
        vec!["/app/views/b.xhtml?x=1&_facesViewIdResource=%2Fviews%2Fb.xhtml".to_string()]
    );
}

// parameter table

#[test]
fn test_put_remove_returns_stored_key() {
    let mut table = ParameterTable::with_namespace("_p1_");
    table.put("_p1_page", vec!["2".to_string()]);
    table.put("sort", vec!["asc".to_string()]);

    assert_eq!(table.remove("page"), Some("_p1_page".to_string()));
    let exported = table.export_excluding(&["page"]);
    assert!(!exported.contains("page"));
    assert!(!exported.contains("_p1_page"));
    assert_eq!(exported.to_query_string(), "sort=asc");
}

// failure modes

#[test]
fn test_empty_target_policies() {
    let mut config = config();
    let resolver = ServletMappingResolver::from_config(&config);
    assert!(matches!(
        BridgeResourceUrl::parse("", &config, &resolver),
        Err(BridgeError::MalformedTarget(_))
    ));

    config.encoding.empty_target = EmptyTargetPolicy::PassThrough;
    let encoded = encode("", &config, &render_ctx());
    assert_eq!(encoded.kind(), "non-encoded");
    assert_eq!(encoded.to_url_string(), "");
}

#[test]
fn test_malformed_query_is_rejected() {
    let config = config();
    let resolver = ServletMappingResolver::from_config(&config);
    assert!(matches!(
        BridgeResourceUrl::parse("/app/a.xhtml?x=%FF", &config, &resolver),
        Err(BridgeError::MalformedTarget(_))
    ));
}
