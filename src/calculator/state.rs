//! Engine snapshot record.

use serde::{Deserialize, Serialize};

use super::engine::{AngleUnit, Operator};

/// Everything needed to rebuild an [`Engine`](super::Engine).
///
/// Produced by `Engine::snapshot` and consumed by `Engine::restore`. Any
/// value of this type is a valid state, including the default one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineState {
    pub pending_input: String,
    #[serde(with = "labelled_float")]
    pub accumulator: Option<f64>,
    pub pending_operator: Option<Operator>,
    #[serde(with = "labelled_float")]
    pub last_result: Option<f64>,
    pub just_evaluated: bool,
    pub angle_unit: AngleUnit,
}

/// Optional floats that keep `NaN` and the infinities.
///
/// JSON has no encoding for non-finite numbers, so those are written as the
/// strings `"NaN"`, `"Infinity"` and `"-Infinity"`.
mod labelled_float {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Label(String),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            None => serializer.serialize_none(),
            Some(v) if v.is_nan() => serializer.serialize_some("NaN"),
            Some(v) if *v == f64::INFINITY => serializer.serialize_some("Infinity"),
            Some(v) if *v == f64::NEG_INFINITY => serializer.serialize_some("-Infinity"),
            Some(v) => serializer.serialize_some(v),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        let Some(repr) = Option::<Repr>::deserialize(deserializer)? else {
            return Ok(None);
        };

        match repr {
            Repr::Number(v) => Ok(Some(v)),
            Repr::Label(label) => match label.as_str() {
                "NaN" => Ok(Some(f64::NAN)),
                "Infinity" => Ok(Some(f64::INFINITY)),
                "-Infinity" => Ok(Some(f64::NEG_INFINITY)),
                other => Err(D::Error::custom(format!("invalid number: {}", other))),
            },
        }
    }
}
