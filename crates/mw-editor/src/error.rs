/// Alias for `Result<T, ClientError>`.
pub type ClientResult<T> = Result<T, ClientError>;

/// Alias for `Result<T, ConfigError>`.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from a validate or export request.
///
/// The `Display` text of each variant is what the status line shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Export was asked for with an empty or whitespace-only name.
    #[error("Please enter a module name.")]
    EmptyName,

    /// A validate or export request is still pending.
    #[error("Another request is already in progress.")]
    Busy,

    /// The document could not be encoded.
    #[error("could not encode document: {0}")]
    Encode(String),

    /// The validator or exporter reported a failure.
    #[error("{0}")]
    Service(String),
}

/// Errors loading or saving an editor configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for an editor configuration.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("could not write config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
