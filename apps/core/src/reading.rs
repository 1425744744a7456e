use serde_json::{Map, Value};

use crate::error::{PollError, Rejection};
use crate::radar::RadarSample;

/// Outcome of validating one sensor sub-object.
pub type Validated<T> = Result<T, Rejection>;

/// Decoded response body.
///
/// Sub-objects are kept as raw JSON so that one malformed sensor cannot
/// fail the decode of the other two. The body itself must be a JSON object;
/// `null` members count as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub radar: Option<Value>,
    pub ir: Option<Value>,
    pub dht: Option<Value>,
}

impl Envelope {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PollError> {
        Ok(Self::from_map(serde_json::from_slice(bytes)?))
    }

    pub fn from_json(body: &str) -> Result<Self, PollError> {
        Ok(Self::from_map(serde_json::from_str(body)?))
    }

    pub fn from_value(value: Value) -> Result<Self, PollError> {
        Ok(Self::from_map(serde_json::from_value(value)?))
    }

    fn from_map(mut members: Map<String, Value>) -> Self {
        let mut take = |key: &str| members.remove(key).filter(|value| !value.is_null());
        Self {
            radar: take("radar"),
            ir: take("ir"),
            dht: take("dht"),
        }
    }

    /// Validates every sub-object independently.
    pub fn readings(&self) -> Readings {
        Readings {
            radar: validate_radar(self.radar.as_ref()),
            ir: validate_ir(self.ir.as_ref()),
            dht: validate_dht(self.dht.as_ref()),
        }
    }
}

/// Temperature and humidity from one combined DHT measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhtReading {
    pub temperature: f64,
    pub humidity: f64,
}

/// Tagged readings for one tick, one entry per sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Readings {
    pub radar: Validated<RadarSample>,
    pub ir: Validated<f64>,
    pub dht: Validated<DhtReading>,
}

/// Angles are rounded to the nearest whole degree.
#[allow(clippy::cast_possible_truncation)]
pub fn validate_radar(value: Option<&Value>) -> Validated<RadarSample> {
    let object = as_object(value)?;
    let angle = number_field(object, "angle")?;
    let distance = number_field(object, "distance")?;
    Ok(RadarSample::new(angle.round() as i64, distance))
}

pub fn validate_ir(value: Option<&Value>) -> Validated<f64> {
    match value {
        None | Some(Value::Null) => Err(Rejection::Absent),
        Some(value) => value.as_f64().ok_or(Rejection::NotANumber("ir")),
    }
}

pub fn validate_dht(value: Option<&Value>) -> Validated<DhtReading> {
    let object = as_object(value)?;
    Ok(DhtReading {
        temperature: number_field(object, "temperature")?,
        humidity: number_field(object, "humidity")?,
    })
}

fn as_object(value: Option<&Value>) -> Validated<&Map<String, Value>> {
    match value {
        None | Some(Value::Null) => Err(Rejection::Absent),
        Some(Value::Object(object)) => Ok(object),
        Some(_) => Err(Rejection::NotAnObject),
    }
}

fn number_field(object: &Map<String, Value>, name: &'static str) -> Validated<f64> {
    match object.get(name) {
        None | Some(Value::Null) => Err(Rejection::MissingField(name)),
        Some(value) => value.as_f64().ok_or(Rejection::NotANumber(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::{DhtReading, Envelope};
    use crate::error::{PollError, Rejection};
    use crate::radar::RadarSample;
    use serde_json::json;

    #[test]
    fn full_envelope_validates() {
        let envelope = Envelope::from_json(
            r#"{"radar":{"angle":90,"distance":42.5},"ir":512,"dht":{"temperature":71.6,"humidity":40}}"#,
        )
        .unwrap();
        let readings = envelope.readings();

        assert_eq!(readings.radar, Ok(RadarSample::new(90, 42.5)));
        assert_eq!(readings.ir, Ok(512.0));
        assert_eq!(
            readings.dht,
            Ok(DhtReading {
                temperature: 71.6,
                humidity: 40.0
            })
        );
    }

    #[test]
    fn missing_keys_are_absent() {
        let readings = Envelope::from_json("{}").unwrap().readings();
        assert_eq!(readings.radar, Err(Rejection::Absent));
        assert_eq!(readings.ir, Err(Rejection::Absent));
        assert_eq!(readings.dht, Err(Rejection::Absent));
    }

    #[test]
    fn null_counts_as_absent() {
        let envelope =
            Envelope::from_value(json!({"radar": null, "ir": null, "dht": {"temperature": 70, "humidity": null}}))
                .unwrap();
        let readings = envelope.readings();
        assert_eq!(readings.radar, Err(Rejection::Absent));
        assert_eq!(readings.ir, Err(Rejection::Absent));
        assert_eq!(readings.dht, Err(Rejection::MissingField("humidity")));
    }

    #[test]
    fn one_bad_sensor_leaves_others_valid() {
        let envelope = Envelope::from_value(json!({
            "radar": {"angle": "north", "distance": 3},
            "ir": 7,
            "dht": [1, 2]
        }))
        .unwrap();
        let readings = envelope.readings();
        assert_eq!(readings.radar, Err(Rejection::NotANumber("angle")));
        assert_eq!(readings.ir, Ok(7.0));
        assert_eq!(readings.dht, Err(Rejection::NotAnObject));
    }

    #[test]
    fn fractional_angle_rounds_to_degree() {
        let envelope = Envelope::from_value(json!({"radar": {"angle": 44.6, "distance": 1}})).unwrap();
        assert_eq!(envelope.readings().radar, Ok(RadarSample::new(45, 1.0)));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let envelope = Envelope::from_value(json!({"ir": 3, "uptime": 1234})).unwrap();
        assert_eq!(envelope.readings().ir, Ok(3.0));
    }

    #[test]
    fn array_body_is_decode_error() {
        let error = Envelope::from_json("[]").unwrap_err();
        assert!(matches!(error, PollError::Decode(_)));

        // Positional members must not be read as sensors.
        let error = Envelope::from_json(r#"[{"angle": 30, "distance": 7}, 42]"#).unwrap_err();
        assert!(matches!(error, PollError::Decode(_)));

        assert!(Envelope::from_value(json!(42)).is_err());
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let error = Envelope::from_slice(b"{not json").unwrap_err();
        assert!(matches!(error, PollError::Decode(_)));
    }
}
