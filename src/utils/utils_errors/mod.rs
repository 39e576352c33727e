use thiserror::Error;

/// A common error type returned by functions throughout the crate.
///
/// Every variant carries a fully formatted message that already includes the file and line
/// where the error was raised, so the `Display` impl simply forwards it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ArmIKError {
    #[error("{0}")]
    GenericError(String),
    #[error("{0}")]
    IdxOutOfBoundError(String),
    #[error("{0}")]
    UnsupportedOperationError(String),
    #[error("{0}")]
    MalformedChainError(String),
    #[error("{0}")]
    WrongSizeError(String),
    #[error("{0}")]
    UnknownAxisError(String),
    #[error("{0}")]
    SerializationError(String)
}
impl ArmIKError {
    pub fn new_generic_error_str(s: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: {} -- File: {}, Line: {}", s, file, line);
        return Self::GenericError(s);
    }
    pub fn new_idx_out_of_bound_error(given_idx: usize, length_of_array: usize, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Index {:?} is too large for the array of length {:?} -- File: {}, Line: {}", given_idx, length_of_array, file, line);
        return Self::IdxOutOfBoundError(s);
    }
    pub fn new_check_for_idx_out_of_bound_error(given_idx: usize, length_of_array: usize, file: &str, line: u32) -> Result<(), Self> {
        return if given_idx < length_of_array {
            Ok(())
        } else {
            Err(Self::new_idx_out_of_bound_error(given_idx, length_of_array, file, line))
        }
    }
    pub fn new_unsupported_operation_error(function_name: &str, message: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Unsupported operation error in function {}.  {} -- File: {}, Line: {}", function_name, message, file, line);
        return Self::UnsupportedOperationError(s);
    }
    /// Raised before any solver iteration begins when the arrays describing a chain disagree
    /// with each other or hold values that cannot describe a physical arm.
    pub fn new_malformed_chain_error(message: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Malformed chain.  {} -- File: {}, Line: {}", message, file, line);
        return Self::MalformedChainError(s);
    }
    pub fn new_wrong_size_error(function_name: &str, given_size: usize, correct_size: usize, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Input into {} was of size {}, but it should be of size {} -- File: {}, Line: {}", function_name, given_size, correct_size, file, line);
        return Self::WrongSizeError(s);
    }
    pub fn new_unknown_axis_error(label: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Unknown joint axis {:?}.  Axis must be one of \"x\", \"y\", or \"z\" -- File: {}, Line: {}", label, file, line);
        return Self::UnknownAxisError(s);
    }
    pub fn new_serialization_error(type_name: &str, message: &str, file: &str, line: u32) -> Self {
        let s = format!("ERROR: Could not (de)serialize {}.  {} -- File: {}, Line: {}", type_name, message, file, line);
        return Self::SerializationError(s);
    }
}
