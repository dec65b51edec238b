//! # Record Module
//!
//! Schema validation for the 13-field clinical record.
//!
//! The schema is fixed: five continuous measurements and eight
//! integer-coded categorical/flag fields. Every field is mandatory and has
//! no default. Validation is type-only by design: out-of-range coded values
//! (e.g. `sex: 7`) pass through to the model unchanged, matching the
//! behavior the model was trained against. Callers must self-constrain.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldError, FieldKind, FieldProblem, ValidationError};

// =============================================================================
// SCHEMA
// =============================================================================

/// The full field schema: name and required semantic type.
pub const SCHEMA: [(&str, FieldKind); 13] = [
    ("age", FieldKind::Float),
    ("sex", FieldKind::Integer),
    ("trestbps", FieldKind::Float),
    ("chol", FieldKind::Float),
    ("thalach", FieldKind::Float),
    ("oldpeak", FieldKind::Float),
    ("cp", FieldKind::Integer),
    ("fbs", FieldKind::Integer),
    ("restecg", FieldKind::Integer),
    ("exang", FieldKind::Integer),
    ("slope", FieldKind::Integer),
    ("ca", FieldKind::Integer),
    ("thal", FieldKind::Integer),
];

// =============================================================================
// PATIENT RECORD
// =============================================================================

/// A validated clinical record: all 13 fields present and type-correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years.
    pub age: f64,
    /// Sex code.
    pub sex: i64,
    /// Resting blood pressure (mm Hg).
    pub trestbps: f64,
    /// Serum cholesterol (mg/dl).
    pub chol: f64,
    /// Maximum heart rate achieved.
    pub thalach: f64,
    /// ST depression induced by exercise.
    pub oldpeak: f64,
    /// Chest pain type code.
    pub cp: i64,
    /// Fasting blood sugar flag.
    pub fbs: i64,
    /// Resting ECG result code.
    pub restecg: i64,
    /// Exercise-induced angina flag.
    pub exang: i64,
    /// ST slope code.
    pub slope: i64,
    /// Number of major vessels.
    pub ca: i64,
    /// Thalassemia code.
    pub thal: i64,
}

impl PatientRecord {
    /// Validate an arbitrary JSON payload against the fixed schema.
    ///
    /// All 13 fields are mandatory. Float fields accept any JSON number.
    /// Integer fields accept any JSON number with a zero fractional part.
    /// Every offending field is collected so the error names them all.
    pub fn from_value(payload: &Value) -> Result<Self, ValidationError> {
        let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;

        let mut errors = Vec::new();
        let mut floats = [0.0_f64; 13];
        let mut ints = [0_i64; 13];

        for (index, &(name, kind)) in SCHEMA.iter().enumerate() {
            match object.get(name) {
                None => errors.push(FieldError {
                    field: name,
                    expected: kind,
                    problem: FieldProblem::Missing,
                }),
                Some(value) => match kind {
                    FieldKind::Float => match value.as_f64() {
                        Some(v) => floats[index] = v,
                        None => errors.push(FieldError {
                            field: name,
                            expected: kind,
                            problem: FieldProblem::WrongType(describe(value)),
                        }),
                    },
                    FieldKind::Integer => match coerce_integer(value) {
                        Some(v) => ints[index] = v,
                        None => errors.push(FieldError {
                            field: name,
                            expected: kind,
                            problem: FieldProblem::WrongType(describe(value)),
                        }),
                    },
                },
            }
        }

        if !errors.is_empty() {
            return Err(ValidationError::Fields(errors));
        }

        Ok(Self {
            age: floats[0],
            sex: ints[1],
            trestbps: floats[2],
            chol: floats[3],
            thalach: floats[4],
            oldpeak: floats[5],
            cp: ints[6],
            fbs: ints[7],
            restecg: ints[8],
            exang: ints[9],
            slope: ints[10],
            ca: ints[11],
            thal: ints[12],
        })
    }
}

/// Coerce a JSON value to an integer code.
///
/// Accepts native integers and integer-valued floats (`3.0` -> `3`).
fn coerce_integer(value: &Value) -> Option<i64> {
    if let Some(v) = value.as_i64() {
        return Some(v);
    }
    let v = value.as_f64()?;
    if v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Describe the JSON type of a rejected value for the error message.
fn describe(value: &Value) -> String {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => "fractional number",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    String::from(kind)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "age": 63, "sex": 1, "trestbps": 145, "chol": 233,
            "thalach": 150, "oldpeak": 2.3, "cp": 3, "fbs": 1,
            "restecg": 0, "exang": 0, "slope": 0, "ca": 0, "thal": 1
        })
    }

    #[test]
    fn valid_record_parses() {
        let record = PatientRecord::from_value(&valid_payload()).unwrap();
        assert_eq!(record.age, 63.0);
        assert_eq!(record.sex, 1);
        assert_eq!(record.oldpeak, 2.3);
        assert_eq!(record.thal, 1);
    }

    #[test]
    fn float_field_accepts_integer_number() {
        let record = PatientRecord::from_value(&valid_payload()).unwrap();
        assert_eq!(record.trestbps, 145.0);
    }

    #[test]
    fn integer_field_accepts_whole_float() {
        let mut payload = valid_payload();
        payload["sex"] = json!(1.0);
        let record = PatientRecord::from_value(&payload).unwrap();
        assert_eq!(record.sex, 1);
    }

    #[test]
    fn integer_field_rejects_fractional() {
        let mut payload = valid_payload();
        payload["sex"] = json!(1.5);
        let err = PatientRecord::from_value(&payload).unwrap_err();
        match err {
            ValidationError::Fields(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "sex");
                assert_eq!(
                    fields[0].problem,
                    FieldProblem::WrongType(String::from("fractional number"))
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_field_is_named() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("thal");
        let err = PatientRecord::from_value(&payload).unwrap_err();
        assert!(err.to_string().contains("thal is missing"));
    }

    #[test]
    fn all_problems_are_collected() {
        let mut payload = valid_payload();
        let object = payload.as_object_mut().unwrap();
        object.remove("age");
        object.insert(String::from("cp"), json!("three"));
        let err = PatientRecord::from_value(&payload).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("age is missing"));
        assert!(msg.contains("cp expected integer, found string"));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = PatientRecord::from_value(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject);
    }

    #[test]
    fn out_of_range_codes_pass_through() {
        // Type-only validation: the schema does not constrain coded ranges.
        let mut payload = valid_payload();
        payload["sex"] = json!(7);
        let record = PatientRecord::from_value(&payload).unwrap();
        assert_eq!(record.sex, 7);
    }

    #[test]
    fn string_number_is_rejected() {
        let mut payload = valid_payload();
        payload["age"] = json!("63");
        let err = PatientRecord::from_value(&payload).unwrap_err();
        assert!(err.to_string().contains("age expected float, found string"));
    }
}
