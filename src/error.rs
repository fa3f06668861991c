use crate::binding::BindingError;
use crate::data::DataError;
use crate::report::ReportError;

/// Exit code for bad input: missing columns, unparsable rows, unknown years.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for runtime failures: network, terminal, filesystem.
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        let code = match err {
            DataError::Fetch(_) | DataError::Io(_) => EXIT_RUNTIME,
            _ => EXIT_INPUT,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}

impl From<BindingError> for AppError {
    fn from(err: BindingError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}
