// File: src/partial_action_url.rs
// Purpose: Encoder for partial (ajax) action URLs

use crate::base_url::{EncodedUrl, NonEncodedString};
use crate::config::BridgeConfig;
use crate::context::BridgeContext;
use crate::error::Result;
use crate::factory::UrlFactory;
use crate::url_base::UrlBase;
use crate::view::ViewResolver;

/// Encoder for targets posted by partial (ajax) requests
///
/// `http` targets pass through untouched; everything else becomes a
/// container action URL carrying the view id as a resource-phase parameter.
pub struct BridgePartialActionUrl<'a> {
    base: UrlBase<'a>,
}

impl<'a> BridgePartialActionUrl<'a> {
    pub fn new(raw: &str, config: &'a BridgeConfig, resolver: &dyn ViewResolver) -> Result<Self> {
        let mut base = UrlBase::new(raw, None, config, Some(resolver))?;
        base.view_id_parameter = config.parameters.view_id_resource.clone();
        Ok(Self { base })
    }

    pub fn view_target(&self) -> Option<&str> {
        self.base.view_target.as_deref()
    }

    pub fn to_encoded_url(&self, ctx: &BridgeContext, factory: &dyn UrlFactory) -> Result<EncodedUrl> {
        if self.base.is_empty_target() {
            return Ok(EncodedUrl::NonEncoded(self.base.empty_target_url()));
        }

        let raw = self.base.uri.as_str();
        if raw.starts_with("http") {
            tracing::debug!("Partial action url is external, passing through: url=[{}]", raw);
            return Ok(EncodedUrl::NonEncoded(NonEncodedString::new(
                raw,
                self.base.parameters.clone(),
            )));
        }

        let action_url = factory.create_action_url(ctx, &self.base.to_target_string(&[]))?;
        Ok(EncodedUrl::Action(action_url))
    }
}
