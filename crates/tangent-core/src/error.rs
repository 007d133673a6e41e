//! Error types for the Tangent registry.
//!
//! Organized by subsystem: configuration errors surfaced at object
//! construction, and storage errors from property declaration. Both are
//! fatal setup-time conditions; the registry's lookup paths never error
//! for a missing derivative (they degrade to a zero property).

use std::error::Error;
use std::fmt;

use crate::name::PropertyName;

/// Fatal configuration errors detected during object construction.
///
/// These indicate a simulation input that cannot possibly be evaluated
/// correctly; they abort setup and never cross into the assembly phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Two parallel parameter lists that must enumerate corresponding
    /// entries differ in length.
    MismatchedListLengths {
        /// Name of the object reporting the mismatch.
        object: String,
        /// Name of the first parameter list.
        first: String,
        /// Entry count of the first list.
        first_len: usize,
        /// Name of the second parameter list.
        second: String,
        /// Entry count of the second list.
        second_len: usize,
    },
    /// A base property name contains the derivative-name separator.
    ///
    /// Canonical derivative names embed the base name; a separator
    /// inside it would make the generated names ambiguous.
    SeparatorInBaseName {
        /// The offending base name.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedListLengths {
                object,
                first,
                first_len,
                second,
                second_len,
            } => {
                write!(
                    f,
                    "'{object}': parameter list '{first}' has {first_len} entries \
                     but '{second}' has {second_len}; they must correspond one-to-one"
                )
            }
            Self::SeparatorInBaseName { name } => {
                write!(
                    f,
                    "base property name '{name}' contains the derivative separator '/'"
                )
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from the property storage layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A property with this name was already declared.
    ///
    /// Each canonical name has exactly one producer; a second
    /// declaration is a conflict, not a merge.
    AlreadyDeclared {
        /// The contested property name.
        name: PropertyName,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyDeclared { name } => {
                write!(f, "property '{name}' is already declared")
            }
        }
    }
}

impl Error for StoreError {}
