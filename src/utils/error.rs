use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Data format error: {message}")]
    DataFormat { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, RosterError>;

impl RosterError {
    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn is_data_format(&self) -> bool {
        matches!(self, Self::DataFormat { .. })
    }

    /// The bare message, without the variant prefix used by `Display`.
    pub fn message(&self) -> String {
        match self {
            Self::DataFormat { message } | Self::Config { message } => message.clone(),
            Self::Io(e) => e.to_string(),
            Self::Xml(e) => e.to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DataFormat { message } => format!("The roster file is malformed: {}", message),
            Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "The roster file could not be found".to_string()
            }
            Self::Io(e) => format!("Could not access the roster file: {}", e),
            Self::Xml(e) => format!("Could not process the XML document: {}", e),
            Self::Config { message } => format!("Invalid configuration: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DataFormat { .. } | Self::Xml(_) => {
                "Check that the file has a <students> root and integer grades separated by commas"
            }
            Self::Io(_) => "Check the file path and its permissions",
            Self::Config { .. } => "Fix the configuration file or command-line flags and retry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_format_display_and_message() {
        let err = RosterError::data_format("invalid performance data");
        assert!(err.is_data_format());
        assert_eq!(err.message(), "invalid performance data");
        assert_eq!(err.to_string(), "Data format error: invalid performance data");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RosterError = io.into();
        assert!(!err.is_data_format());
        assert_eq!(err.user_friendly_message(), "The roster file could not be found");
    }
}
