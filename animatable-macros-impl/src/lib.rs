#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod builder;
mod config;
mod diagnostic;
mod expand;
mod field;
mod synth;
mod validate;

/// Unsynn grammar and token helpers for host declarations.
pub mod grammar;

pub use builder::{FragmentBuilder, VectorFragments};
pub use config::AnimatableConfig;
pub use diagnostic::{Diagnostic, ExpansionErrorKind, Severity};
pub use expand::{Expansion, Outcome, animatable, derive_shape, expand, validate_host};
pub use field::{FieldDecl, FieldDescriptor, collect_fields};
pub use grammar::{HostDecl, HostKind, parse_host};
pub use synth::{AccessorData, synthesize_accessor, synthesize_vector};
pub use validate::{FieldCount, check_eligibility, check_types};

#[cfg(any(test, feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(any(test, feature = "tracing")))]
#[macro_export]
#[doc(hidden)]
/// Forwards to tracing::trace when the tracing feature is enabled
macro_rules! trace {
    ($($tt:tt)*) => {};
}

#[cfg(not(any(test, feature = "tracing")))]
#[macro_export]
#[doc(hidden)]
/// Forwards to tracing::debug when the tracing feature is enabled
macro_rules! debug {
    ($($tt:tt)*) => {};
}
