//! Raw experiment-log schema
//!
//! One subject record per input line, each line a JSON array of step objects.
//! Steps are heterogeneous: the runner logs instruction pages, comprehension
//! quizzes, tracking trials, and slider probes into the same timeline, so every
//! field here is optional and unknown fields are ignored.

use serde::Deserialize;

use crate::error::TabulateError;

/// One dial press sample, logged by the runner as `[time_ms, scale]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DialSample(pub f32, pub f32);

impl DialSample {
    /// Milliseconds since trial start
    pub fn time_ms(&self) -> f32 {
        self.0
    }

    /// Dial position in `[0, 1]`
    pub fn scale(&self) -> f32 {
        self.1
    }
}

/// One selected-object detection flag.
///
/// The runner logs these as booleans; older pilot logs carry 0/1 numbers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ObjectFlag {
    Bool(bool),
    Num(f64),
}

impl ObjectFlag {
    pub fn value(&self) -> f64 {
        match self {
            ObjectFlag::Bool(true) => 1.0,
            ObjectFlag::Bool(false) => 0.0,
            ObjectFlag::Num(n) => *n,
        }
    }
}

/// Quiz steps log structured answer objects under `response`; only a numeric
/// rating counts as an effort report, anything else reads as absent.
fn numeric_response<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// One step of a subject's timeline
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Step category tag (e.g. "comp_quiz")
    #[serde(rename = "type")]
    pub step_type: Option<String>,
    /// Whether a quiz step was answered correctly
    pub correct: Option<bool>,
    /// Scene identifier; only trial steps carry one
    pub trial_id: Option<i32>,
    /// Whether the scene was presented reversed
    pub reversed: Option<bool>,
    /// Position of the trial in presentation order
    pub trial_index: Option<i32>,
    /// Per-object detection flags from the response phase
    pub selected_objects: Option<Vec<ObjectFlag>>,
    /// Self-reported effort rating from the slider probe
    #[serde(deserialize_with = "numeric_response")]
    pub response: Option<f64>,
    /// Sparse effort-dial trace recorded during tracking
    pub effort_dial_responses: Option<Vec<DialSample>>,
}

/// One subject's full timeline, in presentation order
pub type SubjectRecord = Vec<Step>;

/// Adapter for parsing raw experiment logs
pub struct RecordAdapter;

impl RecordAdapter {
    /// Parse NDJSON (newline-delimited JSON) containing one subject per line
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<SubjectRecord>, TabulateError> {
        let mut records = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<SubjectRecord>(trimmed) {
                Ok(record) => records.push(record),
                Err(e) => {
                    return Err(TabulateError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(records)
    }
}
