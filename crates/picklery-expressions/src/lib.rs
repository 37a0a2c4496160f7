//! Cucumber Expressions and parameter types for picklery.
//!
//! The crate compiles Cucumber Expressions (`I have {int} cucumber(s)`) into
//! anchored regular expressions, binds their parameters to the types held in
//! a [`ParameterTypeRegistry`], and converts captured text into typed
//! [`ParameterValue`]s. Raw regex step patterns get the same treatment via
//! [`RegularExpression`], and [`generate_expression`] suggests an expression
//! for step text that nothing matches yet.

mod capture;
mod errors;
mod expression;
mod groups;
mod parameter;
mod regular;
mod snippet;

pub use capture::Argument;
pub use errors::{ExpressionError, ParameterTypeError};
pub use expression::{
    CucumberExpression, ExpressionSource, ParameterSlot, build_regex_from_expression,
};
pub use parameter::{Cleaner, ParameterType, ParameterTypeRegistry, ParameterValue, Transformer};
pub use regular::RegularExpression;
pub use snippet::{GeneratedExpression, generate_expression};
