use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if polling bounds, generation settings, or
    /// server limits are out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_poll()?;
        self.validate_settings()?;
        self.validate_server()?;
        Ok(())
    }

    fn validate_poll(&self) -> anyhow::Result<()> {
        let poll = &self.prediction.poll;

        if poll.interval.is_zero() {
            anyhow::bail!("prediction.poll.interval must be greater than 0");
        }

        if poll.deadline < poll.interval {
            anyhow::bail!(
                "prediction.poll.deadline ({:?}) must not be shorter than prediction.poll.interval ({:?})",
                poll.deadline,
                poll.interval
            );
        }

        if self.prediction.request_timeout.is_zero() {
            anyhow::bail!("prediction.request_timeout must be greater than 0");
        }

        Ok(())
    }

    fn validate_settings(&self) -> anyhow::Result<()> {
        let settings = &self.prediction.settings;

        if settings.output_compression > 100 {
            anyhow::bail!("prediction.settings.output_compression must be between 0 and 100");
        }

        if settings.number_of_images == 0 {
            anyhow::bail!("prediction.settings.number_of_images must be at least 1");
        }

        if self.prediction.model.trim().is_empty() {
            anyhow::bail!("prediction.model must not be empty");
        }

        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if self.server.body_limit == 0 {
            anyhow::bail!("server.body_limit must be greater than 0");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }
}
