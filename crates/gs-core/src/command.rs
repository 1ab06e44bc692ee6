//! Typed parameters for mission control commands.
//!
//! Every parameter is required. Values are checked against the declared
//! kind before a command is sent; `int` parameters with a byte `size` must
//! also fit in that many unsigned bytes.

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("{name} is required")]
    Empty { name: String },

    #[error("invalid int value for {name}: \"{value}\"")]
    NotAnInteger { name: String, value: String },

    #[error("invalid int value for {name}: {value} (must be 0-{max})")]
    OutOfRange {
        name: String,
        value: String,
        max: u128,
    },

    #[error("invalid float value for {name}: \"{value}\"")]
    NotAFloat { name: String, value: String },

    #[error("invalid boolean value for {name}: \"{value}\" (expected true or false)")]
    NotABoolean { name: String, value: String },

    #[error("invalid parameter declaration \"{0}\"; expected NAME:KIND[:SIZE]")]
    InvalidDeclaration(String),

    #[error("unknown parameter kind \"{0}\"; expected int, float, boolean, or string")]
    UnknownKind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Int,
    Float,
    Boolean,
    String,
}

impl FromStr for ParameterKind {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" => Ok(ParameterKind::Int),
            "float" => Ok(ParameterKind::Float),
            "boolean" | "bool" => Ok(ParameterKind::Boolean),
            "string" => Ok(ParameterKind::String),
            _ => Err(ParameterError::UnknownKind(s.to_string())),
        }
    }
}

/// Declared parameter of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParameter {
    pub name: String,
    pub kind: ParameterKind,
    /// Width in bytes; bounds `int` values to `0..=2^(8*size)-1`.
    pub size: Option<u32>,
}

impl CommandParameter {
    /// Largest accepted `int` value, or `None` when no size is declared.
    /// A size of zero counts as undeclared.
    #[must_use]
    pub fn max_value(&self) -> Option<u128> {
        let bits = self.size.filter(|size| *size > 0)?.saturating_mul(8);
        Some(1u128.checked_shl(bits).map_or(u128::MAX, |limit| limit - 1))
    }
}

/// Parses `NAME:KIND` or `NAME:KIND:SIZE`.
impl FromStr for CommandParameter {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().map(str::trim).unwrap_or_default();
        let kind = parts.next();
        let size = parts.next();
        if name.is_empty() || parts.next().is_some() {
            return Err(ParameterError::InvalidDeclaration(s.to_string()));
        }
        let kind = kind
            .ok_or_else(|| ParameterError::InvalidDeclaration(s.to_string()))?
            .parse()?;
        let size = size
            .map(|raw| raw.trim().parse::<u32>())
            .transpose()
            .map_err(|_| ParameterError::InvalidDeclaration(s.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            kind,
            size,
        })
    }
}

/// Checks one value against its declared parameter.
///
/// # Errors
///
/// Returns the [`ParameterError`] describing why `value` is rejected.
pub fn validate_parameter(param: &CommandParameter, value: &str) -> Result<(), ParameterError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParameterError::Empty {
            name: param.name.clone(),
        });
    }

    match param.kind {
        ParameterKind::Int => {
            let parsed = trimmed
                .parse::<i128>()
                .map_err(|_| ParameterError::NotAnInteger {
                    name: param.name.clone(),
                    value: value.to_string(),
                })?;
            if let Some(max) = param.max_value() {
                if !u128::try_from(parsed).is_ok_and(|v| v <= max) {
                    return Err(ParameterError::OutOfRange {
                        name: param.name.clone(),
                        value: value.to_string(),
                        max,
                    });
                }
            }
            Ok(())
        }
        ParameterKind::Float => match trimmed.parse::<f64>() {
            Ok(v) if !v.is_nan() => Ok(()),
            _ => Err(ParameterError::NotAFloat {
                name: param.name.clone(),
                value: value.to_string(),
            }),
        },
        ParameterKind::Boolean => {
            if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
                Ok(())
            } else {
                Err(ParameterError::NotABoolean {
                    name: param.name.clone(),
                    value: value.to_string(),
                })
            }
        }
        ParameterKind::String => Ok(()),
    }
}

/// Checks every declared parameter. A parameter with no entry in `values`
/// counts as empty.
///
/// # Errors
///
/// Returns the first failing parameter's error, in declaration order.
pub fn validate_parameters(
    params: &[CommandParameter],
    values: &HashMap<String, String>,
) -> Result<(), ParameterError> {
    params.iter().try_for_each(|param| {
        let value = values.get(&param.name).map_or("", String::as_str);
        validate_parameter(param, value)
    })
}
