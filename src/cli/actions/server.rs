use crate::{api, cli::actions::Action, gate::state::GateConfig};
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action.
/// # Errors
/// Returns an error if the base URL is invalid or the server fails to start.
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            base_url,
            session_ttl_seconds,
        } => {
            // Validate early so a typo fails at startup, not at cookie time.
            Url::parse(&base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

            let config = GateConfig::new(base_url).with_session_ttl_seconds(session_ttl_seconds);

            api::new(port, config).await
        }
    }
}
