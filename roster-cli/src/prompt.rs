//! Interactive prompts.
//!
//! The terminal is the last resort for login fields and the default way to
//! choose the organization and class.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use roster_core::ClassSelector;
use roster_fetch::{CredentialError, SecretField, SecretSource};

// ============================================================================
// Login Fields
// ============================================================================

/// Asks the operator for login fields. Secret fields are not echoed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptSource;

impl SecretSource for PromptSource {
    fn id(&self) -> &str {
        "prompt"
    }

    fn lookup(&self, field: &SecretField) -> Result<Option<String>, CredentialError> {
        read_field(field).map(Some)
    }
}

/// Reads one field from the terminal.
pub fn read_field(field: &SecretField) -> Result<String, CredentialError> {
    let theme = ColorfulTheme::default();
    let value = if field.secret {
        Password::with_theme(&theme)
            .with_prompt(field.prompt)
            .interact()
    } else {
        Input::<String>::with_theme(&theme)
            .with_prompt(field.prompt)
            .interact_text()
    };

    value.map_err(|e| CredentialError::Prompt(e.to_string()))
}

// ============================================================================
// Class Selector
// ============================================================================

/// Builds the selector from flags alone, if `--organization` was given.
pub fn selector_from_flags(organization: Option<&str>, class: Option<&str>) -> Option<ClassSelector> {
    organization.map(|org| ClassSelector::new(org, class.unwrap_or_default()))
}

/// Returns the organization and class to list, prompting for what the flags
/// leave open. An empty class selects the whole organization.
pub fn get_class_selector(
    organization: Option<&str>,
    class: Option<&str>,
) -> Result<ClassSelector, dialoguer::Error> {
    if let Some(selector) = selector_from_flags(organization, class) {
        return Ok(selector);
    }

    let theme = ColorfulTheme::default();
    let organization: String = Input::with_theme(&theme)
        .with_prompt("Organization")
        .interact_text()?;

    let class = match class {
        Some(class) => class.to_string(),
        None => Input::with_theme(&theme)
            .with_prompt("Class (empty for the whole organization)")
            .allow_empty(true)
            .interact_text()?,
    };

    Ok(ClassSelector::new(organization, class))
}
