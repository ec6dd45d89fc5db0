//! Type system errors

use thiserror::Error;

/// Errors that can occur while constructing types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// `void` used as an array element type
    #[error("array element type must not be void")]
    VoidElement,

    /// `void` used as a parameter of a function type
    #[error("parameter {index} of a function type must not be void")]
    VoidParameter {
        /// Zero-based parameter index
        index: usize,
    },
}
