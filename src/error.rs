//! Exit code handling.

/// Exit codes for the imgdupsort application.
///
/// - 0: Success (completed normally, files sorted)
/// - 1: General error (listing failure, directory creation failure, ...)
/// - 2: No images found (completed normally, nothing to sort)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success: images were scanned and sorted into the output directory.
    Success = 0,
    /// General error: an unrecoverable error aborted the run.
    GeneralError = 1,
    /// No images: the input directory contained no decodable images.
    NoImages = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "IS000",
            Self::GeneralError => "IS001",
            Self::NoImages => "IS002",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NoImages.as_i32(), 2);
    }

    #[test]
    fn test_code_prefixes_unique() {
        let prefixes = [
            ExitCode::Success.code_prefix(),
            ExitCode::GeneralError.code_prefix(),
            ExitCode::NoImages.code_prefix(),
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in &prefixes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
