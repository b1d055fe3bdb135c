//! Share tokens: a workspace without identifiers, as JSON, in URL-safe base64.

use milhas_core::codec::{decode_url_safe, encode_url_safe};
use milhas_core::CoreError;
use milhas_shared::{Flight, FlightDetails, ShareableWorkspace, Workspace, SHARE_FORMAT_VERSION};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::book::WorkspaceBook;

pub const INVALID_WORKSPACE_FORMAT: &str = "Invalid workspace data format";

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Workspace not found")]
    NotFound(String),

    /// Token is not URL-safe base64 of UTF-8 JSON
    #[error("{0}")]
    Decoding(String),

    /// Decoded JSON does not have the shape of a shared workspace
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Encoding(String),
}

impl From<CoreError> for ShareError {
    fn from(err: CoreError) -> Self {
        ShareError::Decoding(err.to_string())
    }
}

pub fn encode_workspace(workspace: &Workspace) -> Result<String, ShareError> {
    let shareable = ShareableWorkspace::from(workspace);
    let json = serde_json::to_string(&shareable)
        .map_err(|e| ShareError::Encoding(format!("Failed to export workspace: {e}")))?;

    Ok(encode_url_safe(&json))
}

/// Decodes and shape-checks a token.
///
/// The shape check asks for a truthy `version`, a truthy string `name` and an
/// array `flights`. Flight entries may omit fields; fields that are present
/// must have the right JSON type.
pub fn decode_token(token: &str) -> Result<ShareableWorkspace, ShareError> {
    let json = decode_url_safe(token)?;
    let parsed: Value =
        serde_json::from_str(&json).map_err(|e| ShareError::Decoding(e.to_string()))?;

    let version = parsed.get("version").filter(|v| is_truthy(v));
    let name = parsed.get("name").filter(|v| is_truthy(v));
    let flights = parsed.get("flights").filter(|v| v.is_array());

    let (Some(version), Some(name), Some(flights)) = (version, name, flights) else {
        return Err(ShareError::Validation(INVALID_WORKSPACE_FORMAT.to_string()));
    };
    let Some(name) = name.as_str() else {
        return Err(ShareError::Validation(INVALID_WORKSPACE_FORMAT.to_string()));
    };

    let flights: Vec<FlightDetails> = serde_json::from_value(flights.clone())
        .map_err(|e| ShareError::Validation(format!("{INVALID_WORKSPACE_FORMAT}: {e}")))?;

    let version = version
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(SHARE_FORMAT_VERSION);
    if version != SHARE_FORMAT_VERSION {
        debug!(version, "Importing share token with a different format version");
    }

    Ok(ShareableWorkspace {
        name: name.to_string(),
        flights,
        version,
    })
}

/// JavaScript truthiness
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl WorkspaceBook {
    pub fn export_workspace(&self, id: &Uuid) -> Result<String, ShareError> {
        let workspace = self
            .get(id)
            .ok_or_else(|| ShareError::NotFound(id.to_string()))?;

        let token = encode_workspace(workspace)?;
        info!("Workspace {} exported ({} flights)", id, workspace.flights.len());
        Ok(token)
    }

    /// Appends the workspace carried by `token` under fresh ids. The active
    /// workspace does not change.
    pub fn import_workspace(&self, token: &str) -> Result<(Self, Uuid), ShareError> {
        let shareable = decode_token(token)?;

        let workspace = Workspace::new(
            shareable.name,
            shareable.flights.into_iter().map(Flight::new).collect(),
        );
        let id = workspace.id;

        info!(
            "Workspace imported: {} ({}) with {} flights",
            workspace.name,
            id,
            workspace.flights.len()
        );
        Ok((self.push_workspace(workspace), id))
    }
}
