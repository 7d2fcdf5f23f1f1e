//! Keychain command - store or remove login fields in the system keychain.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use roster_fetch::{KeychainStore, SecretField, fields};

use crate::prompt::read_field;

/// Arguments for the keychain command.
#[derive(Args)]
pub struct KeychainArgs {
    #[command(subcommand)]
    pub action: KeychainAction,
}

/// Keychain subcommands.
#[derive(Subcommand)]
pub enum KeychainAction {
    /// Prompt for a value and save it.
    Store {
        /// Field to store.
        field: Field,
    },

    /// Remove a saved value.
    Delete {
        /// Field to remove.
        field: Field,
    },
}

/// Login fields that can live in the keychain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Field {
    /// Church account username.
    Username,
    /// Church account password.
    Password,
    /// OAuth2 client id.
    OauthClientId,
    /// OAuth2 client secret.
    OauthClientSecret,
}

impl Field {
    fn secret_field(self) -> SecretField {
        match self {
            Field::Username => fields::USERNAME,
            Field::Password => fields::PASSWORD,
            Field::OauthClientId => fields::OAUTH_CLIENT_ID,
            Field::OauthClientSecret => fields::OAUTH_CLIENT_SECRET,
        }
    }
}

/// Runs the keychain command.
pub fn run(args: &KeychainArgs) -> Result<()> {
    let store = KeychainStore::new();

    match args.action {
        KeychainAction::Store { field } => {
            let field = field.secret_field();
            let value = read_field(&field)?;
            store.set(field.account, &value)?;
            println!("Stored {} in keychain service {}", field.account, store.service());
        }
        KeychainAction::Delete { field } => {
            let field = field.secret_field();
            store.delete(field.account)?;
            println!("Deleted {} from keychain service {}", field.account, store.service());
        }
    }

    Ok(())
}
