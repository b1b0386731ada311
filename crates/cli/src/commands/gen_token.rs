//! `gen-token`: issue a token for running actions manually in the Robusta UI.

use clap::Args;
use tracing::debug;

use crate::auth::{self, AuthError, HttpTokenStore, TokenRequest};
use crate::cluster::KubeCluster;
use crate::profile::BackendProfile;
use crate::ui;

/// Generate token required to run actions manually in Robusta UI
#[derive(Args, Debug)]
pub struct GenTokenCommand {
    /// Robusta account id
    #[arg(long)]
    account_id: Option<String>,

    /// User id for which the token is created
    #[arg(long)]
    user_id: Option<String>,

    /// User session token. Created for an authenticated user via the Robusta UI
    #[arg(long)]
    stk: Option<String>,

    /// Namespace Robusta is installed in (defaults to the current kube context's namespace)
    #[arg(long, env = "ROBUSTA_NAMESPACE")]
    namespace: Option<String>,

    /// Token store endpoint (defaults to the backend profile's)
    #[arg(long, env = "ROBUSTA_STORE_TOKEN_URL")]
    store_url: Option<String>,

    /// Print debug output
    #[arg(long)]
    pub debug: bool,
}

impl GenTokenCommand {
    /// Run the command, printing the token on success.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] that aborted issuance.
    pub async fn run(&self) -> Result<(), AuthError> {
        let request = TokenRequest::new(
            self.account_id.clone(),
            self.user_id.clone(),
            self.stk.clone(),
        )?;

        let store_url = match &self.store_url {
            Some(url) => url.clone(),
            None => {
                BackendProfile::load()
                    .map_err(|e| AuthError::InvalidProfile(format!("{e:#}")))?
                    .robusta_store_token_url
            }
        };
        debug!(store_url = %store_url, "Resolved token store");

        let spinner = ui::spinner("connecting to cluster...");
        let result = async {
            let cluster = KubeCluster::connect()
                .await
                .map_err(|e| AuthError::ClusterUnavailable(format!("{e:#}")))?;
            let store = HttpTokenStore::new(store_url);
            auth::gen_token(&request, self.namespace.as_deref(), &cluster, &store).await
        }
        .await;
        spinner.finish_and_clear();

        let token = result?;
        ui::print_success("Token created successfully. Submit it in the Robusta UI");
        println!("{token}");
        Ok(())
    }
}
