//! Tool invocation - one inbound request to run a tool.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{InvocationId, SessionId};

/// A request to invoke a tool, as received from a transport.
///
/// Arguments are kept as raw JSON until the dispatcher validates them
/// against the tool's definition. The session is present when the call
/// arrived over an event stream, and absent for sessionless REST calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    id: InvocationId,
    tool_name: String,
    #[serde(default)]
    arguments: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_id: Option<SessionId>,
}

impl ToolInvocation {
    /// Creates a sessionless invocation.
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            id: InvocationId::new(),
            tool_name: tool_name.into(),
            arguments,
            session_id: None,
        }
    }

    /// Attaches the session the call arrived on.
    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn id(&self) -> InvocationId {
        self.id
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn arguments(&self) -> &Value {
        &self.arguments
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }
}
