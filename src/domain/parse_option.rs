/// Error returned when a flattening option cannot be parsed from a string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid {option} '{value}': expected one of {expected}")]
pub struct ParseOptionError {
    option: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseOptionError {
    pub(crate) fn new(option: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            option,
            value: value.to_string(),
            expected,
        }
    }
}
