//! Structured configuration issues.
//!
//! Configuration loaders report problems as a list of [`ConfigIssue`]s
//! instead of failing on the first one, so the operator sees everything at
//! once and warnings never block a run.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required string field is empty.
    EmptyValue { field: String },
    /// The default short name breaks the 0-4 letter rule.
    InvalidShortName { value: String },
    /// A timeout of zero would make every probe report "no response".
    ZeroTimeout { field: String },
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let err = ConfigIssue::error(
            ConfigIssueCode::EmptyValue {
                field: "tool.command".to_string(),
            },
            "tool.command is empty",
        );
        assert!(err.is_error());

        let warn = ConfigIssue::warning(
            ConfigIssueCode::ZeroTimeout {
                field: "timeouts.probe_millis".to_string(),
            },
            "probe timeout is zero",
        );
        assert!(!warn.is_error());
        assert_eq!(warn.severity, Severity::Warning);
    }
}
