//! Account lookups and registration.

use crate::{
    entities::{Account, account},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Registers a new account.
///
/// # Errors
/// Returns an error if the email is blank or already registered, or if any
/// field contains a line break.
pub async fn create_account<C>(
    db: &C,
    email: &str,
    first_name: &str,
    last_name: &str,
) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    let email = email.trim();
    if [email, first_name, last_name]
        .iter()
        .any(|field| field.contains(['\r', '\n']))
    {
        return Err(Error::Config {
            message: "Account fields cannot contain line breaks".to_string(),
        });
    }
    if email.is_empty() {
        return Err(Error::Config {
            message: "Account email cannot be empty".to_string(),
        });
    }

    let account = account::ActiveModel {
        email: Set(email.to_string()),
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Registered account {} ({})", account.id, account.email);
    Ok(account)
}

/// Retrieves an account by id, returning None if it does not exist.
pub async fn get_account_by_id<C>(db: &C, user_id: i64) -> Result<Option<account::Model>>
where
    C: ConnectionTrait,
{
    Account::find_by_id(user_id).one(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_create_and_get_account() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_account(&db, " ada@example.com ", "Ada", "Lovelace").await?;
        assert_eq!(created.email, "ada@example.com");

        let fetched = get_account_by_id(&db, created.id).await?;
        assert_eq!(fetched, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_account(&db, "ada@example.com", "Ada", "Lovelace").await?;

        let result = create_account(&db, "ada@example.com", "Other", "Person").await;
        assert!(matches!(result, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_email_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_account(&db, "  ", "Ada", "Lovelace").await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_line_breaks_are_rejected() -> Result<()> {
        let db = setup_test_db().await?;

        let result =
            create_account(&db, "ada@example.com\r\nBcc: x@example.com", "Ada", "Lovelace").await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = create_account(&db, "ada@example.com", "Ada\nX-Extra: 1", "Lovelace").await;
        assert!(matches!(result, Err(Error::Config { .. })));

        assert!(get_account_by_id(&db, 1).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_account_is_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_account_by_id(&db, 404).await?.is_none());
        Ok(())
    }
}
