use core::fmt;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Real(f64),
    Int(i32),
    String(String),
}

impl ParamValue {
    fn same_kind(&self, other: &ParamValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            ParamValue::Real(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Real(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::String(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    value: ParamValue,
    range_suggestion: String,
}

impl Param {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_value(&self) -> &ParamValue {
        &self.value
    }

    /// Only values of the declared kind are accepted.
    pub fn set_value(&mut self, value: ParamValue) -> bool {
        if !self.value.same_kind(&value) {
            return false;
        }
        self.value = value;
        true
    }

    pub fn get_range_suggestion(&self) -> &str {
        &self.range_suggestion
    }
}

/// Named parameters of a planner or state space, listed in name order.
#[derive(Debug, Default, Clone)]
pub struct ParamSet {
    pub params: BTreeMap<String, Param>,
}

impl ParamSet {
    pub fn declare_param(&mut self, name: &str, value: ParamValue, range_suggestion: &str) {
        self.params.insert(
            name.to_string(),
            Param {
                name: name.to_string(),
                value,
                range_suggestion: range_suggestion.to_string(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name).map(Param::get_value)
    }

    /// Returns false if the parameter is unknown or the value has the wrong kind.
    pub fn set(&mut self, name: &str, value: ParamValue) -> bool {
        match self.params.get_mut(name) {
            Some(param) => param.set_value(value),
            None => {
                tracing::warn!("unknown parameter `{}`", name);
                false
            }
        }
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn size(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_set() {
        let mut params = ParamSet::default();
        params.declare_param("goal_bias", ParamValue::Real(0.1), "0.:.05:1.");
        assert!(params.has_param("goal_bias"));
        assert!(params.set("goal_bias", ParamValue::Real(0.2)));
        assert_eq!(params.get("goal_bias").and_then(ParamValue::as_real), Some(0.2));
        assert!(!params.set("goal_bias", ParamValue::Bool(true)));
        assert!(!params.set("range", ParamValue::Real(1.0)));
        assert_eq!(params.params["goal_bias"].get_range_suggestion(), "0.:.05:1.");
    }
}
