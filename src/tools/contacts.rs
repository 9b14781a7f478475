//! `add_contact` and `get_contacts` tools.

use super::ToolDefinition;
use crate::db::{ContactRepo, NewContact};
use crate::error::{AppError, AppResult};
use crate::web::AppState;
use serde_json::json;
use tracing::info;

pub fn add_definition() -> ToolDefinition {
    ToolDefinition {
        name: "add_contact",
        description: "Add a new contact to the database",
        parameters: json!({
            "type": "object",
            "properties": {
                "first_name": { "type": "string", "minLength": 1 },
                "last_name": { "type": "string", "minLength": 1 },
                "email": { "type": "string", "format": "email" },
                "wallet_address": { "type": "string", "minLength": 1 },
                "destination_tag": { "type": "string" }
            },
            "required": ["first_name", "last_name", "email", "wallet_address"]
        }),
    }
}

pub fn get_definition() -> ToolDefinition {
    ToolDefinition {
        name: "get_contacts",
        description: "Get the list of available contacts from the database",
        parameters: json!({ "type": "object", "properties": {} }),
    }
}

/// Validate and insert a new contact, then refresh the prompt cache
pub async fn add(state: &AppState, new_contact: NewContact) -> AppResult<serde_json::Value> {
    validate_contact(&new_contact)?;

    let contact = ContactRepo::insert(&state.pool, new_contact).await?;
    state.contacts.refresh(&state.pool).await?;

    info!("Contact added: {}", contact.display_name());

    Ok(json!({
        "success": true,
        "contact": contact,
        "message": "Contact added successfully",
    }))
}

/// Bounded contact listing
pub async fn get(state: &AppState) -> AppResult<serde_json::Value> {
    let contacts = ContactRepo::list(&state.pool).await?;

    Ok(json!({
        "contacts": contacts
            .iter()
            .map(|c| json!({
                "name": c.display_name(),
                "wallet_address": c.wallet_address,
            }))
            .collect::<Vec<_>>(),
    }))
}

fn validate_contact(contact: &NewContact) -> AppResult<()> {
    if contact.first_name.trim().is_empty() {
        return Err(AppError::validation("First name is required"));
    }
    if contact.last_name.trim().is_empty() {
        return Err(AppError::validation("Last name is required"));
    }
    if !is_plausible_email(&contact.email) {
        return Err(AppError::validation("Invalid email address"));
    }
    if contact.wallet_address.trim().is_empty() {
        return Err(AppError::validation("Wallet address is required"));
    }
    Ok(())
}

/// Shape check only; deliverability is not this service's problem
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(email: &str) -> NewContact {
        NewContact {
            first_name: "Luc".to_string(),
            last_name: "Moreau".to_string(),
            email: email.to_string(),
            wallet_address: "rLuc123".to_string(),
            destination_tag: None,
        }
    }

    #[test]
    fn test_email_shape_check() {
        assert!(is_plausible_email("luc@example.com"));
        assert!(!is_plausible_email("luc-at-example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("luc@nodot"));
        assert!(!is_plausible_email("luc@.com"));
    }

    #[test]
    fn test_validate_contact_rejects_bad_email() {
        assert!(validate_contact(&contact("not-an-email")).is_err());
        assert!(validate_contact(&contact("luc@example.com")).is_ok());
    }

    #[test]
    fn test_validate_contact_rejects_blank_names() {
        let mut c = contact("luc@example.com");
        c.first_name = "  ".to_string();
        assert!(validate_contact(&c).is_err());
    }
}
