use thiserror::Error;

#[derive(Error, Debug)]
/// Errors that can be returned
pub enum Error {
    /// Error reading a dictionary, word list or config file
    #[error("File \"{path}\" could not be read")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// The config file is not valid JSON
    #[error("Config file \"{path}\" could not be parsed: {source}")]
    ConfigParseError {
        path: String,
        source: serde_json::Error,
    },

    /// A game rule set references a config entry that does not exist
    #[error("No entry named \"{name}\" in config section {section}")]
    MissingEntry { section: &'static str, name: String },

    /// The requested game is not defined in the config
    #[error("\"{0}\" is not a configured game")]
    UnknownGame(String),

    /// Target-driven board generation against a word list distribution
    #[error("Minimum word/score board generation is not supported for word list games")]
    UnsupportedGeneration,
}
