//! Construction records and trip requests.
//!
//! Both arrive as loosely typed JSON objects. The accessors here turn them
//! into typed values and report the first field that does not fit.

use crate::error::EnvError;
use serde_json::Value;

/// A keyed record describing one entity to construct.
///
/// Required fields: `type`, `name`, `position`, `direction`, `speed`.
/// Optional: `color`, and for packages `weight`. Any other keys are kept
/// verbatim as the entity's attribute bag.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionRecord {
    value: Value,
}

impl ConstructionRecord {
    /// Wraps a JSON value.
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Returns the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Returns the raw field, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.value.get(field)
    }

    /// Type tag selecting the concrete entity kind.
    pub fn type_tag(&self) -> Result<&str, EnvError> {
        self.string("type")
    }

    /// Display name.
    pub fn name(&self) -> Result<&str, EnvError> {
        self.string("name")
    }

    pub fn position(&self) -> Result<[f64; 3], EnvError> {
        self.vector("position")
    }

    pub fn direction(&self) -> Result<[f64; 3], EnvError> {
        self.vector("direction")
    }

    pub fn speed(&self) -> Result<f64, EnvError> {
        self.number("speed")?
            .ok_or_else(|| EnvError::missing("speed"))
    }

    pub fn color(&self) -> Option<&str> {
        self.value.get("color").and_then(Value::as_str)
    }

    /// Reads a required string field.
    pub fn string(&self, field: &str) -> Result<&str, EnvError> {
        match self.value.get(field) {
            None => Err(EnvError::missing(field)),
            Some(v) => v
                .as_str()
                .ok_or_else(|| EnvError::invalid(field, "expected a string")),
        }
    }

    /// Reads a required 3-element numeric array.
    pub fn vector(&self, field: &str) -> Result<[f64; 3], EnvError> {
        let items = self
            .value
            .get(field)
            .ok_or_else(|| EnvError::missing(field))?
            .as_array()
            .ok_or_else(|| EnvError::invalid(field, "expected an array"))?;

        if items.len() != 3 {
            return Err(EnvError::invalid(
                field,
                format!("expected 3 elements, got {}", items.len()),
            ));
        }

        let mut out = [0.0; 3];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item
                .as_f64()
                .ok_or_else(|| EnvError::invalid(field, "expected numeric elements"))?;
        }
        Ok(out)
    }

    /// Reads an optional numeric field.
    ///
    /// Numeric strings such as `"75.5"` are accepted as well.
    pub fn number(&self, field: &str) -> Result<Option<f64>, EnvError> {
        match self.value.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| EnvError::invalid(field, "number out of range")),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|e| EnvError::invalid(field, e.to_string())),
            Some(_) => Err(EnvError::invalid(field, "expected a number")),
        }
    }
}

impl From<Value> for ConstructionRecord {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// A request to deliver `<name>_package` to the robot called `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    /// Name of the receiving robot
    pub name: String,

    /// Search strategy name for the destination leg ("astar", "dfs", ...)
    pub search: String,

    /// The request as received, forwarded to the view on scheduling
    pub details: Value,
}

impl TripRequest {
    /// Parses a trip request from its JSON form.
    ///
    /// `name` is required; a missing `search` is treated as empty, which
    /// later selects an undecorated straight-line leg.
    pub fn from_value(details: Value) -> Result<Self, EnvError> {
        let name = details
            .get("name")
            .ok_or_else(|| EnvError::missing("name"))?
            .as_str()
            .ok_or_else(|| EnvError::invalid("name", "expected a string"))?
            .to_string();
        let search = details
            .get("search")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            name,
            search,
            details,
        })
    }

    /// Name of the package this request refers to.
    pub fn package_name(&self) -> String {
        format!("{}_package", self.name)
    }
}
