use std::process::ExitCode;

use crate::warnings::{ExtractionWarning, Severity};

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed
/// - `Failure` (1): A source file could not be extracted, or `init` found an existing config
/// - `Error` (2): Command failed due to internal error (config error, I/O error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// `Failure` as soon as one warning has error severity.
    pub fn from_warnings(warnings: &[ExtractionWarning]) -> Self {
        if warnings.iter().any(|w| w.severity == Severity::Error) {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warnings::WarningKind;

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    #[test]
    fn only_errors_fail() {
        let complex = ExtractionWarning::new(
            WarningKind::ComplexExpression,
            Severity::Warning,
            "Complex expression",
            "src/a.ts",
            1,
            0,
        );
        assert_eq!(ExitStatus::from_warnings(&[complex.clone()]), ExitStatus::Success);

        let broken = ExtractionWarning::parse_error("src/b.ts", "unexpected token");
        assert_eq!(ExitStatus::from_warnings(&[complex, broken]), ExitStatus::Failure);
        assert_eq!(ExitStatus::from_warnings(&[]), ExitStatus::Success);
    }
}
