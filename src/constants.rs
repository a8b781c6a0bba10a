//! Named constant sets with reverse lookup.

use crate::value::Value;

/// A fixed set of named constants, inspectable by name or by value.
///
/// Implementors list their constants once; the lookup methods are provided.
pub trait Constants {
    /// Every constant of the set, in declaration order.
    fn constants() -> Vec<(&'static str, Value)>;

    /// Value of the constant called `name`.
    fn constant(name: &str) -> Option<Value> {
        Self::constants()
            .into_iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, value)| value)
    }

    /// Name of the first constant holding `value`.
    fn constant_name(value: &Value) -> Option<&'static str> {
        Self::constants()
            .into_iter()
            .find(|(_, candidate)| candidate == value)
            .map(|(name, _)| name)
    }

    fn has_constant(name: &str) -> bool {
        Self::constant(name).is_some()
    }

    fn has_constant_value(value: &Value) -> bool {
        Self::constant_name(value).is_some()
    }
}
