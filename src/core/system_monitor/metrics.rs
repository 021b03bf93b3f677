use serde::Serialize;
use std::fmt;

/// A label value. Booleans stay typed until the exposition boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LabelValue {
    Text(String),
    Flag(bool),
}

impl LabelValue {
    /// Wire representation of the value
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelValue::Text(s) => f.write_str(s),
            LabelValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for LabelValue {
    fn from(value: &str) -> Self {
        LabelValue::Text(value.to_string())
    }
}

impl From<String> for LabelValue {
    fn from(value: String) -> Self {
        LabelValue::Text(value)
    }
}

impl From<&String> for LabelValue {
    fn from(value: &String) -> Self {
        LabelValue::Text(value.clone())
    }
}

impl From<bool> for LabelValue {
    fn from(value: bool) -> Self {
        LabelValue::Flag(value)
    }
}

impl From<usize> for LabelValue {
    fn from(value: usize) -> Self {
        LabelValue::Text(value.to_string())
    }
}

impl From<u32> for LabelValue {
    fn from(value: u32) -> Self {
        LabelValue::Text(value.to_string())
    }
}

/// One row of a metric family
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub labels: Vec<LabelValue>,
    pub value: f64,
}

/// A gauge metric family: fixed name, unit and label schema, variable rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub name: String,
    pub documentation: String,
    pub unit: Option<String>,
    pub label_names: Vec<String>,
    pub samples: Vec<Sample>,
}

impl MetricRecord {
    pub fn new(name: &str, documentation: &str, label_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            documentation: documentation.to_string(),
            unit: None,
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
            samples: Vec::new(),
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Append a row.
    ///
    /// Rows whose label arity differs from the schema are dropped, and
    /// non-finite values are written as 0.
    pub fn add_sample(&mut self, labels: Vec<LabelValue>, value: f64) {
        if labels.len() != self.label_names.len() {
            log::error!(
                "Dropping {} row with {} label values (expected {})",
                self.name,
                labels.len(),
                self.label_names.len()
            );
            return;
        }

        let value = if value.is_finite() {
            value
        } else {
            log::debug!("Non-finite value for {}, reporting 0", self.name);
            0.0
        };

        self.samples.push(Sample { labels, value });
    }

    /// Metric name as scraped: the unit is appended unless the name already
    /// carries it.
    pub fn exposed_name(&self) -> String {
        match &self.unit {
            Some(unit) if !unit.is_empty() => {
                let suffix = format!("_{}", unit).to_ascii_lowercase();
                if self.name.to_ascii_lowercase().ends_with(&suffix) {
                    self.name.clone()
                } else {
                    format!("{}_{}", self.name, unit)
                }
            }
            _ => self.name.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Value of the first row whose labels render to `labels`
    pub fn value_for(&self, labels: &[&str]) -> Option<f64> {
        self.samples
            .iter()
            .find(|s| {
                s.labels.len() == labels.len()
                    && s.labels.iter().zip(labels).all(|(v, l)| v.render() == *l)
            })
            .map(|s| s.value)
    }
}

/// Shorthand for building label tuples from mixed types.
#[macro_export]
macro_rules! labels {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::core::system_monitor::LabelValue::from($value)),*]
    };
}
