use crate::api;
use crate::cli::actions::Action;
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, dsn } => {
            // Reject malformed connection strings before handing them to the pool.
            let dsn = Url::parse(&dsn)
                .with_context(|| "Invalid database connection string".to_string())?;

            api::new(port, dsn.to_string()).await?;
        }
    }

    Ok(())
}
