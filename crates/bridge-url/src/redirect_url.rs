// File: src/redirect_url.rs
// Purpose: Redirect URL encoder

use crate::base_url::{EncodedUrl, NonEncodedString};
use crate::config::BridgeConfig;
use crate::context::{BridgeContext, PhaseOracle};
use crate::error::Result;
use crate::url_base::UrlBase;
use indexmap::IndexMap;

/// Parameters appended to a redirect target; `None` clears a parameter
pub type RedirectParameters = IndexMap<String, Option<Vec<String>>>;

/// Encoder for `redirect` targets
///
/// Redirects are always handed back as plain strings. During a partial
/// (ajax) request the ajax-redirect marker is added so the client performs
/// the navigation.
pub struct BridgeRedirectUrl<'a> {
    base: UrlBase<'a>,
}

impl<'a> BridgeRedirectUrl<'a> {
    pub fn new(
        ctx: &BridgeContext,
        raw: &str,
        redirect_parameters: Option<&RedirectParameters>,
        config: &'a BridgeConfig,
    ) -> Result<Self> {
        let mut base = UrlBase::new(raw, None, config, None)?;

        if ctx.is_partial_request() {
            base.parameters
                .set(config.parameters.ajax_redirect.as_str(), "true");
        }

        if let Some(redirect_parameters) = redirect_parameters {
            for (name, values) in redirect_parameters {
                base.parameters
                    .put(name.as_str(), values.clone().unwrap_or_default());
            }
        }

        Ok(Self { base })
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.base.parameter(name)
    }

    pub fn to_encoded_url(&self, ctx: &BridgeContext) -> Result<EncodedUrl> {
        if self.base.is_empty_target() {
            return Ok(EncodedUrl::NonEncoded(self.base.empty_target_url()));
        }

        tracing::debug!(
            phase = %ctx.current_phase(),
            "Encoding redirect url=[{}]",
            self.base.uri
        );
        Ok(EncodedUrl::NonEncoded(NonEncodedString::new(
            self.base.merged_string(),
            self.base.parameters.clone(),
        )))
    }
}
