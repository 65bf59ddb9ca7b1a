use crate::{ActionError, Result};

/// All configuration for one run, resolved once at process start.
///
/// Values come from GitHub Actions style `INPUT_<NAME>` environment
/// variables, with CLI flags taking precedence. No other module reads
/// inputs from the environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The runner already provides a persistent SSH agent
    pub self_hosted: bool,

    /// Private key to load into the agent (key material, not a path)
    pub private_key: String,

    /// Verbatim content appended to ~/.ssh/known_hosts
    pub known_hosts: String,

    /// Full SSH client config; overwrites ~/.ssh/config when set
    pub ssh_config: String,

    pub access_token: String,
    pub access_token_user: String,

    /// Explicit repository URL to apply the token to (current origin if empty)
    pub access_token_repository: String,

    /// Explicit path to the Deployer binary
    pub deployer_binary: String,

    /// Release version to download when no binary is found locally
    pub deployer_version: String,

    /// Deployer sub-command to run, e.g. "deploy production"
    pub dep: String,

    pub ansi: bool,

    /// Verbosity flag passed through verbatim, e.g. "-vvv"
    pub verbosity: String,
}

/// Read an action input from the environment.
///
/// Follows the Actions convention: `INPUT_` prefix, name uppercased,
/// dashes kept. Missing inputs resolve to the empty string.
fn input(name: &str) -> String {
    std::env::var(format!("INPUT_{}", name.to_uppercase())).unwrap_or_default()
}

/// Parse a boolean input the way Actions does.
///
/// Accepts `true`/`True`/`TRUE` and `false`/`False`/`FALSE`; an unset
/// input is false.
fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "" | "false" | "False" | "FALSE" => Ok(false),
        "true" | "True" | "TRUE" => Ok(true),
        other => Err(ActionError::Config(format!(
            "Input '{}' is not a boolean: '{}'",
            name, other
        ))),
    }
}

impl Config {
    /// Build the configuration from the environment, with CLI overrides.
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let self_hosted = match overrides.self_hosted {
            Some(v) => v,
            None => parse_bool("self-hosted", &input("self-hosted"))?,
        };
        let ansi = match overrides.ansi {
            Some(v) => v,
            None => parse_bool("ansi", &input("ansi"))?,
        };

        Ok(Config {
            self_hosted,
            private_key: overrides.private_key.unwrap_or_else(|| input("private-key")),
            known_hosts: overrides.known_hosts.unwrap_or_else(|| input("known-hosts")),
            ssh_config: overrides.ssh_config.unwrap_or_else(|| input("ssh-config")),
            access_token: overrides.access_token.unwrap_or_else(|| input("access-token")),
            access_token_user: overrides
                .access_token_user
                .unwrap_or_else(|| input("access-token-user")),
            access_token_repository: overrides
                .access_token_repository
                .unwrap_or_else(|| input("access-token-repository")),
            deployer_binary: overrides
                .deployer_binary
                .unwrap_or_else(|| input("deployer-binary")),
            deployer_version: overrides
                .deployer_version
                .unwrap_or_else(|| input("deployer-version")),
            dep: overrides.dep.unwrap_or_else(|| input("dep")),
            ansi,
            verbosity: overrides.verbosity.unwrap_or_else(|| input("verbosity")),
        })
    }
}

/// CLI-supplied values that take precedence over environment inputs.
#[derive(Debug, Default)]
pub struct Overrides {
    pub self_hosted: Option<bool>,
    pub private_key: Option<String>,
    pub known_hosts: Option<String>,
    pub ssh_config: Option<String>,
    pub access_token: Option<String>,
    pub access_token_user: Option<String>,
    pub access_token_repository: Option<String>,
    pub deployer_binary: Option<String>,
    pub deployer_version: Option<String>,
    pub dep: Option<String>,
    pub ansi: Option<bool>,
    pub verbosity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_valid() {
        assert!(!parse_bool("x", "").unwrap());
        assert!(!parse_bool("x", "false").unwrap());
        assert!(!parse_bool("x", "False").unwrap());
        assert!(!parse_bool("x", "FALSE").unwrap());
        assert!(parse_bool("x", "true").unwrap());
        assert!(parse_bool("x", "True").unwrap());
        assert!(parse_bool("x", "TRUE").unwrap());
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert!(parse_bool("ansi", "yes").is_err());
        assert!(parse_bool("ansi", "1").is_err());
        assert!(parse_bool("ansi", "truthy").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            dep: Some("deploy production".to_string()),
            ansi: Some(true),
            ..Default::default()
        };
        let config = Config::resolve(overrides).unwrap();
        assert_eq!(config.dep, "deploy production");
        assert!(config.ansi);
    }
}
