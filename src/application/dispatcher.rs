//! ToolDispatcher - Single entry point for tool invocations.
//!
//! Resolves the tool, validates its arguments, gates tools that need a
//! credential, and routes to the authorization flow, the local clock or
//! the calendar proxy. Dispatch never fails: every outcome is a
//! `ToolResult`.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::domain::authorization::CorrelationToken;
use crate::domain::foundation::SessionId;
use crate::domain::tools::catalog::{self, params};
use crate::domain::tools::{ArgumentError, ToolArguments, ToolInvocation, ToolRegistry, ToolResult};

use super::authorization_flow::AuthorizationFlowManager;
use super::calendar_proxy::CalendarProxy;
use super::current_time;

/// Routes tool invocations.
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    authorization: Arc<AuthorizationFlowManager>,
    proxy: CalendarProxy,
}

impl ToolDispatcher {
    pub fn new(
        registry: Arc<ToolRegistry>,
        authorization: Arc<AuthorizationFlowManager>,
        proxy: CalendarProxy,
    ) -> Self {
        Self {
            registry,
            authorization,
            proxy,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Executes an invocation and returns its result.
    pub async fn dispatch(&self, invocation: ToolInvocation) -> ToolResult {
        let session = invocation
            .session_id()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let span = tracing::info_span!(
            "tool_dispatch",
            tool = %invocation.tool_name(),
            invocation_id = %invocation.id(),
            session_id = %session,
        );

        async move {
            let started = Instant::now();
            let result = self.route(&invocation).await;
            tracing::info!(
                outcome = %result.kind(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Tool dispatched"
            );
            result
        }
        .instrument(span)
        .await
    }

    async fn route(&self, invocation: &ToolInvocation) -> ToolResult {
        let name = invocation.tool_name();

        // 1. Resolve the tool
        let definition = match self.registry.resolve(name) {
            Ok(definition) => definition,
            Err(_) => return ToolResult::unknown_tool(name),
        };

        // 2. Validate arguments against the schema
        let arguments = match definition.validate(invocation.arguments()) {
            Ok(arguments) => arguments,
            Err(err) => return ToolResult::validation_error(&err),
        };

        // 3. Gate tools that need a credential
        if definition.requires_authentication()
            && self.authorization.usable_credential().await.is_none()
        {
            return ToolResult::authentication_required(name);
        }

        // 4. Route
        match name {
            catalog::AUTH => self.begin_auth(&arguments, invocation.session_id()).await,
            catalog::GET_CURRENT_TIME => current_time::current_time(&arguments),
            _ => self.proxy.execute(name, &arguments).await,
        }
    }

    async fn begin_auth(&self, arguments: &ToolArguments, session: Option<SessionId>) -> ToolResult {
        let token = match arguments
            .string(params::FOR_METHOD)
            .and_then(|method| {
                CorrelationToken::new(method)
                    .map_err(|e| ArgumentError::invalid(params::FOR_METHOD, e.to_string()))
            }) {
            Ok(token) => token,
            Err(err) => return ToolResult::validation_error(&err),
        };

        let url = self.authorization.begin_authorization(&token, session).await;
        ToolResult::success(format!("Please visit this URL to authenticate: {}", url))
    }
}
