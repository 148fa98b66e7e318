//! Auth Config

use clap::Args;

/// Token authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret key used to derive bearer-token verifier hashes. Must stay
    /// stable across restarts or issued tokens stop validating.
    #[arg(long, env = "AUTH_TOKEN_KEY", hide_env_values = true)]
    pub token_key: String,
}
