//! Parameter rows for parameterized tests
//!
//! Each row is the argument tuple for one run of a parameterized test body.
//! Values are stored as JSON so rows of mixed types can be declared inline
//! with the [`params!`](crate::params) macro.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One row of test arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet(Vec<Value>);

impl ParameterSet {
    /// Row with no arguments, passed to non-parameterized bodies
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a row from already converted values
    pub fn from_values(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Append an argument
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.0.push(value.into());
        self
    }

    /// Number of arguments in the row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the row has no arguments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw argument values
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Raw argument at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Deserialize the argument at `index`
    ///
    /// # Example
    ///
    /// ```
    /// use tcv_domain::params;
    ///
    /// let row = params![8, 5, "three"];
    /// let x: i64 = row.arg(0).unwrap();
    /// let label: String = row.arg(2).unwrap();
    /// assert_eq!((x, label.as_str()), (8, "three"));
    /// ```
    pub fn arg<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        let value = self.0.get(index).ok_or_else(|| {
            Error::invalid_argument(format!(
                "parameter index {index} out of range for row {self}"
            ))
        })?;
        Ok(serde_json::from_value(value.clone())?)
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, ")")
    }
}

/// Build a [`ParameterSet`] from a list of values convertible into JSON
#[macro_export]
macro_rules! params {
    ($($value:expr),* $(,)?) => {
        $crate::value_objects::ParameterSet::from_values(vec![
            $(::core::convert::Into::<$crate::value_objects::Value>::into($value)),*
        ])
    };
}
