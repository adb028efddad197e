pub mod add;
pub mod ask;
pub mod events;

use anyhow::Result;
use evboard_core::firestore::Firestore;
use evboard_core::{AuthClient, BoardConfig, Session};
use owo_colors::OwoColorize;

/// Bootstrap a session and open the store client.
///
/// A degraded session is an error here: every caller of this helper needs an
/// identity to talk to the store. The session itself never blocks — a
/// failure surfaces immediately instead of hanging the command.
pub async fn connect(config: &BoardConfig) -> Result<Firestore> {
    let auth = AuthClient::new(&config.api_key);
    let session = Session::establish(config, &auth).await;

    match session.identity() {
        Some(identity) => Ok(Firestore::new(
            &config.project_id,
            &config.deployment_id,
            identity,
        )),
        None => {
            let error = session.error().unwrap_or("unknown auth failure");
            eprintln!("{}", error.red());
            anyhow::bail!("Could not sign in to the event board")
        }
    }
}
