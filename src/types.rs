/// Label used for the missing-value bucket in categorical frequencies.
pub const MISSING_LABEL: &str = "(missing)";

/// A spreadsheet cell, tagged once at load time so the analysis code never
/// re-inspects raw strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Converts a raw text field into a tagged value. Empty fields and the
    /// conventional `NA` marker become `Missing`; anything that parses as a
    /// finite float becomes `Number`.
    pub fn parse(raw: &str) -> Value {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "NA" {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Display label used by frequency ranking and the chart renderer.
    /// Whole numbers drop their fractional part so `2.0` ranks as `2`.
    pub fn label(&self) -> String {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            Value::Number(n) => format!("{n}"),
            Value::Text(s) => s.clone(),
            Value::Missing => MISSING_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// A column is numeric only when every non-missing cell is a number.
/// Mixed columns and columns with no non-missing cells are categorical.
pub fn classify(values: &[Value]) -> ColumnKind {
    let mut saw_number = false;
    for value in values {
        match value {
            Value::Number(_) => saw_number = true,
            Value::Text(_) => return ColumnKind::Categorical,
            Value::Missing => {}
        }
    }
    if saw_number {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}
