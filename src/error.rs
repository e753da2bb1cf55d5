use thiserror::Error;

/// Exit code when the requested task is not recognized
pub const EXIT_UNKNOWN_TASK: i32 = 2;

/// Exit code when an external tool cannot be started (shell convention)
pub const EXIT_LAUNCH_FAILED: i32 = 127;

/// Exit code for configuration and other internal errors
pub const EXIT_INTERNAL: i32 = 1;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{}", unknown_task_message(.name, .suggestions))]
    UnknownTask {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code this error maps to
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::UnknownTask { .. } => EXIT_UNKNOWN_TASK,
            Error::Launch { .. } => EXIT_LAUNCH_FAILED,
            _ => EXIT_INTERNAL,
        }
    }
}

fn unknown_task_message(name: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        format!("Unknown task '{}'", name)
    } else {
        format!(
            "Unknown task '{}'\n\nDid you mean '{}'?",
            name,
            suggestions.join("', '")
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_task_message_with_suggestion() {
        let err = Error::UnknownTask {
            name: "tests".to_string(),
            suggestions: vec!["test".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Unknown task 'tests'"));
        assert!(msg.contains("Did you mean 'test'?"));
    }

    #[test]
    fn test_unknown_task_message_without_suggestion() {
        let err = Error::UnknownTask {
            name: "deploy".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "Unknown task 'deploy'");
    }

    #[test]
    fn test_exit_codes() {
        let unknown = Error::UnknownTask {
            name: "x".to_string(),
            suggestions: vec![],
        };
        assert_eq!(unknown.exit_code(), EXIT_UNKNOWN_TASK);

        let launch = Error::Launch {
            program: "mypy".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(launch.exit_code(), EXIT_LAUNCH_FAILED);

        assert_eq!(Error::Config("bad".to_string()).exit_code(), EXIT_INTERNAL);
    }
}
