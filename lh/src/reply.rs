//! Response repair and decoding
//!
//! The responder is asked for JSON but returns free text. The repair pass
//! strips newlines and removes trailing commas before a closing bracket or
//! brace, which are the only malformations corrected. The decode pass parses
//! the repaired text and coerces it into the reply shape the caller expects.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Repaired responder text could not be parsed as JSON
#[derive(Debug, Error)]
#[error("responder output is not valid JSON: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Parsed responder output did not match the expected reply shape
#[derive(Debug, Error)]
#[error("responder output does not match the expected shape: {0}")]
pub struct SchemaError(#[from] serde_json::Error);

/// Either failure mode of the repair-and-decode pipeline
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

fn trailing_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",(\s*[\]}])").expect("trailing comma regex is valid"))
}

/// Strip newlines and trailing commas before a closing `]` or `}`
pub fn repair(raw: &str) -> String {
    let flat = raw.replace('\n', "");
    trailing_comma_re().replace_all(&flat, "$1").into_owned()
}

/// Repair then parse into a JSON document
pub fn decode(raw: &str) -> Result<Value, DecodeError> {
    debug!(raw_len = raw.len(), "decode: called");
    let repaired = repair(raw);
    serde_json::from_str(&repaired).map_err(DecodeError::from)
}

/// Repair, parse, and coerce into the expected reply shape
///
/// Unknown fields are ignored; fields marked with a serde default may be
/// absent. A missing required field or a wrong field type is a
/// [`SchemaError`], distinct from an unparseable document.
pub fn decode_as<T: DeserializeOwned>(raw: &str) -> Result<T, ReplyError> {
    let value = decode(raw)?;
    let shaped = serde_json::from_value(value).map_err(SchemaError::from)?;
    Ok(shaped)
}

/// Answer to a decide question
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerReply {
    pub answer: String,
}

/// A subject produced by the responder
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectReply {
    pub subject: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub reason: String,
}

/// Zero or more child subjects from a decomposition request
///
/// A reply without a "subjects" key legitimately declines to add anything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectListReply {
    #[serde(default)]
    pub subjects: Vec<SubjectReply>,
}

/// A resource entry from a terminalize request
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReply {
    pub title: String,
    pub description: String,
}

/// An exercise entry from a terminalize request
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseReply {
    pub description: String,
}

/// Resources and exercises from a terminalize request
///
/// Both keys are optional; a missing key is an empty list, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceExerciseReply {
    #[serde(default)]
    pub resources: Vec<ResourceReply>,

    #[serde(default)]
    pub exercises: Vec<ExerciseReply>,
}
