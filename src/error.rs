//! Error types and command line error handling macros.

use thiserror::Error;

/// Error produced when a tracing component is configured or invoked incorrectly.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TracingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl TracingError {
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type for fallible tracing operations.
pub type TracingResult<T> = Result<T, TracingError>;

/// Returns an `InvalidArgument` error with the given formatted message
/// unless the given condition holds.
#[macro_export]
macro_rules! ensure_valid {
    ($logic:expr, $($print_arg:tt)*) => {
        if !$logic {
            return Err($crate::error::TracingError::invalid_argument(format!($($print_arg)*)));
        }
    };
}

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

#[macro_export]
macro_rules! exit_on_false {
    ($logic:expr, $($print_arg:tt)*) => {
        if $logic {
            true
        } else {
            $crate::exit_with_error!($($print_arg)*)
        }
    };
}

#[macro_export]
macro_rules! exit_on_none {
    ($option:expr, $($print_arg:tt)*) => {
        $option.unwrap_or_else(|| $crate::exit_with_error!($($print_arg)*))
    };
}

#[cfg(test)]
mod tests {

    use super::*;

    fn checked_step(step: f64) -> TracingResult<f64> {
        ensure_valid!(step > 0.0, "Step size must be positive, got {}", step);
        Ok(step)
    }

    #[test]
    fn ensure_valid_returns_invalid_argument() {
        assert_eq!(checked_step(0.5), Ok(0.5));
        assert_eq!(
            checked_step(-1.0),
            Err(TracingError::InvalidArgument(
                "Step size must be positive, got -1".to_string()
            ))
        );
        assert_eq!(
            checked_step(0.0).unwrap_err().to_string(),
            "Invalid argument: Step size must be positive, got 0"
        );
    }
}
