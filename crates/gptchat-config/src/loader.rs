use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus file access
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Check values the type system cannot
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_client()?;
        self.validate_defaults()?;
        Ok(())
    }

    fn validate_client(&self) -> anyhow::Result<()> {
        if self.client.api_key.expose_secret().trim().is_empty() {
            anyhow::bail!("client.api_key must not be empty");
        }

        if let Some(ref base_url) = self.client.base_url
            && base_url.cannot_be_a_base()
        {
            anyhow::bail!("client.base_url must be a hierarchical URL, got `{base_url}`");
        }

        self.client.timeout()?;
        self.client.connect_timeout()?;

        Ok(())
    }

    fn validate_defaults(&self) -> anyhow::Result<()> {
        let defaults = &self.defaults;

        if defaults.model.trim().is_empty() {
            anyhow::bail!("defaults.model must not be empty");
        }

        check_range("defaults.temperature", defaults.temperature, 0.0, 2.0)?;
        check_range("defaults.top_p", defaults.top_p, 0.0, 1.0)?;
        check_range("defaults.presence_penalty", defaults.presence_penalty, -2.0, 2.0)?;
        check_range("defaults.frequency_penalty", defaults.frequency_penalty, -2.0, 2.0)?;

        Ok(())
    }
}

fn check_range(name: &str, value: Option<f64>, min: f64, max: f64) -> anyhow::Result<()> {
    match value {
        Some(v) if !(min..=max).contains(&v) => {
            anyhow::bail!("{name} must be between {min} and {max}, got {v}")
        }
        _ => Ok(()),
    }
}
