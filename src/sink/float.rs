//! Lossless JSON encoding for `f32` values.
//!
//! Finite values are plain numbers, NaN and the infinities are written as the strings `"NaN"`,
//! `"inf"` and `"-inf"`.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const NAN: &str = "NaN";
const INF: &str = "inf";
const NEG_INF: &str = "-inf";

struct Float(f32);

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Finite(f32),
    Special(String),
}

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_nan() {
            serializer.serialize_str(NAN)
        } else if v == f32::INFINITY {
            serializer.serialize_str(INF)
        } else if v == f32::NEG_INFINITY {
            serializer.serialize_str(NEG_INF)
        } else {
            serializer.serialize_f32(v)
        }
    }
}

impl<'de> Deserialize<'de> for Float {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = match Repr::deserialize(deserializer)? {
            Repr::Finite(v) => v,
            Repr::Special(s) => match s.as_str() {
                NAN => f32::NAN,
                INF => f32::INFINITY,
                NEG_INF => f32::NEG_INFINITY,
                other => {
                    return Err(de::Error::invalid_value(
                        de::Unexpected::Str(other),
                        &"a number, \"NaN\", \"inf\" or \"-inf\"",
                    ))
                }
            },
        };

        Ok(Float(v))
    }
}

pub(crate) mod scalar {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(v: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        Float(*v).serialize(serializer)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Float::deserialize(deserializer).map(|Float(v)| v)
    }
}

pub(crate) mod seq {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(v: &[f32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(v.iter().map(|&x| Float(x)))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<f32>, D::Error> {
        let values = Vec::<Float>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|Float(v)| v).collect())
    }
}

#[cfg(test)]
mod test {
    use crate::sink::Record;

    #[test]
    fn non_finite_values_survive_json() {
        let record = Record::Histogram {
            tag: "gradient of trainable parameter w".into(),
            values: vec![f32::NAN, f32::INFINITY, f32::NEG_INFINITY, 0.5],
            step: 2,
        };

        let line = serde_json::to_string(&record).unwrap();
        assert!(line.contains(r#""values":["NaN","inf","-inf",0.5]"#), "{line}");

        let Record::Histogram { values, .. } = serde_json::from_str(&line).unwrap() else {
            panic!("expected a histogram: {line}");
        };
        assert!(values[0].is_nan());
        assert_eq!(&values[1..], [f32::INFINITY, f32::NEG_INFINITY, 0.5]);
    }

    #[test]
    fn unknown_strings_are_rejected() {
        let line = r#"{"kind":"scalar","tag":"train loss","value":"nope","step":0}"#;
        assert!(serde_json::from_str::<Record>(line).is_err());
    }
}
