//! Model tool-call registry and dispatch.
//!
//! The chat front end hands the model these definitions; when the model
//! emits a tool call, the web layer routes it through [`dispatch`].

pub mod contacts;
pub mod send_check;
pub mod send_cross_currency;
pub mod send_xrp;

use crate::error::{AppError, AppResult};
use crate::web::AppState;
use serde::Serialize;

/// A tool the model may call, with its JSON-schema parameters
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: serde_json::Value,
}

/// All registered tool definitions
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        send_xrp::definition(),
        send_check::definition(),
        send_cross_currency::definition(),
        contacts::add_definition(),
        contacts::get_definition(),
    ]
}

/// Dispatch a model tool call to its handler
pub async fn dispatch(
    state: &AppState,
    name: &str,
    arguments: serde_json::Value,
) -> AppResult<serde_json::Value> {
    match name {
        "send_xrp" => send_xrp::run(state, parse_args(arguments)?).await,
        "send_check" => send_check::run(state, parse_args(arguments)?).await,
        "send_cross_currency" => {
            send_cross_currency::run(state, parse_args(arguments)?).await
        }
        "add_contact" => contacts::add(state, parse_args(arguments)?).await,
        "get_contacts" => contacts::get(state).await,
        other => Err(AppError::UnknownTool(other.to_string())),
    }
}

/// Decode tool arguments into their parameter struct; a shape mismatch is
/// a client error, not a server one
fn parse_args<T: serde::de::DeserializeOwned>(arguments: serde_json::Value) -> AppResult<T> {
    serde_json::from_value(arguments).map_err(|e| AppError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_all_five_tools() {
        let names: Vec<&str> = definitions().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "send_xrp",
                "send_check",
                "send_cross_currency",
                "add_contact",
                "get_contacts"
            ]
        );
    }

    #[test]
    fn test_definitions_carry_object_schemas() {
        for def in definitions() {
            assert_eq!(def.parameters["type"], "object", "tool {}", def.name);
        }
    }
}
