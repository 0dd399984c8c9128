//! OSC wire codec - typed values on and off the wire
//!
//! The device speaks OSC with three argument kinds: int, float and
//! string. Booleans travel as int 0/1. Decoding is checked against the
//! target leaf's declared kind; anything that does not map cleanly is a
//! `TypeMismatch`, never a silent coercion.

use crate::state::{LeafValue, StateError, ValueKind};
use rosc::{decoder, encoder, OscMessage, OscPacket, OscType};
use thiserror::Error;
use tracing::trace;

/// Argument as tagged on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Int(i32),
    Float(f32),
    Str(String),
}

impl WireValue {
    /// Leaf kind the wire tag naturally carries
    pub fn natural_kind(&self) -> ValueKind {
        match self {
            WireValue::Int(_) | WireValue::Float(_) => ValueKind::Number,
            WireValue::Str(_) => ValueKind::Text,
        }
    }

    /// Decode into a value for a leaf declared as `kind`
    pub fn decode_for(&self, address: &str, kind: ValueKind) -> Result<LeafValue, StateError> {
        match (kind, self) {
            (ValueKind::Bool, WireValue::Int(0)) => Ok(LeafValue::Bool(false)),
            (ValueKind::Bool, WireValue::Int(1)) => Ok(LeafValue::Bool(true)),
            (ValueKind::Number, WireValue::Float(f)) => Ok(LeafValue::Number(f64::from(*f))),
            (ValueKind::Number, WireValue::Int(i)) => Ok(LeafValue::Number(f64::from(*i))),
            (ValueKind::Text, WireValue::Str(s)) => Ok(LeafValue::Text(s.clone())),
            _ => Err(StateError::TypeMismatch {
                address: address.to_string(),
                expected: kind,
                found: self.natural_kind(),
            }),
        }
    }
}

impl From<&LeafValue> for WireValue {
    fn from(value: &LeafValue) -> Self {
        match value {
            LeafValue::Bool(b) => WireValue::Int(i32::from(*b)),
            LeafValue::Number(n) => WireValue::Float(*n as f32),
            LeafValue::Text(s) => WireValue::Str(s.clone()),
        }
    }
}

impl From<WireValue> for OscType {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Int(i) => OscType::Int(i),
            WireValue::Float(f) => OscType::Float(f),
            WireValue::Str(s) => OscType::String(s),
        }
    }
}

impl TryFrom<&OscType> for WireValue {
    type Error = WireError;

    fn try_from(arg: &OscType) -> Result<Self, Self::Error> {
        match arg {
            OscType::Int(i) => Ok(WireValue::Int(*i)),
            OscType::Float(f) => Ok(WireValue::Float(*f)),
            OscType::String(s) => Ok(WireValue::Str(s.clone())),
            other => Err(WireError::UnsupportedArgument(format!("{:?}", other))),
        }
    }
}

/// Codec failures
#[derive(Debug, Error)]
pub enum WireError {
    #[error("OSC codec error: {0:?}")]
    Codec(rosc::OscError),

    #[error("unsupported OSC argument: {0}")]
    UnsupportedArgument(String),
}

impl From<rosc::OscError> for WireError {
    fn from(err: rosc::OscError) -> Self {
        WireError::Codec(err)
    }
}

/// One inbound parameter report
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub address: String,
    pub value: WireValue,
}

/// Encode a write of `value` to `address`
pub fn encode_set(address: &str, value: &LeafValue) -> Result<Vec<u8>, WireError> {
    let packet = OscPacket::Message(OscMessage {
        addr: address.to_string(),
        args: vec![WireValue::from(value).into()],
    });
    Ok(encoder::encode(&packet)?)
}

/// Encode a value query (address without arguments)
pub fn encode_query(address: &str) -> Result<Vec<u8>, WireError> {
    let packet = OscPacket::Message(OscMessage {
        addr: address.to_string(),
        args: Vec::new(),
    });
    Ok(encoder::encode(&packet)?)
}

/// Decode a datagram into parameter reports, flattening bundles
///
/// Messages that do not carry exactly one int, float or string argument
/// are skipped one by one; only an undecodable datagram is an error.
pub fn decode_packet(buf: &[u8]) -> Result<Vec<Feedback>, WireError> {
    let (_, packet) = decoder::decode_udp(buf)?;
    let mut out = Vec::new();
    collect(packet, &mut out);
    Ok(out)
}

fn collect(packet: OscPacket, out: &mut Vec<Feedback>) {
    match packet {
        OscPacket::Message(msg) => {
            if msg.args.len() != 1 {
                trace!(addr = %msg.addr, args = msg.args.len(), "Ignoring message without single argument");
                return;
            }
            match WireValue::try_from(&msg.args[0]) {
                Ok(value) => out.push(Feedback {
                    address: msg.addr,
                    value,
                }),
                Err(e) => trace!(addr = %msg.addr, error = %e, "Ignoring message"),
            }
        }
        OscPacket::Bundle(bundle) => {
            for content in bundle.content {
                collect(content, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosc::{OscBundle, OscTime};

    #[test]
    fn test_decode_for_bool() {
        assert_eq!(
            WireValue::Int(1).decode_for("/ch/1/mute", ValueKind::Bool),
            Ok(LeafValue::Bool(true))
        );
        assert_eq!(
            WireValue::Int(0).decode_for("/ch/1/mute", ValueKind::Bool),
            Ok(LeafValue::Bool(false))
        );
        assert!(matches!(
            WireValue::Int(2).decode_for("/ch/1/mute", ValueKind::Bool),
            Err(StateError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_for_rejects_cross_kind() {
        let err = WireValue::Str("-10".to_string())
            .decode_for("/ch/1/fdr", ValueKind::Number)
            .unwrap_err();
        assert_eq!(
            err,
            StateError::TypeMismatch {
                address: "/ch/1/fdr".to_string(),
                expected: ValueKind::Number,
                found: ValueKind::Text,
            }
        );
        assert!(WireValue::Float(1.0)
            .decode_for("/ch/1/name", ValueKind::Text)
            .is_err());
    }

    #[test]
    fn test_decode_numbers() {
        assert_eq!(
            WireValue::Float(-10.0).decode_for("/ch/1/fdr", ValueKind::Number),
            Ok(LeafValue::Number(-10.0))
        );
        assert_eq!(
            WireValue::Int(3).decode_for("/ch/1/col", ValueKind::Number),
            Ok(LeafValue::Number(3.0))
        );
    }

    #[test]
    fn test_encode_set_decodes_as_feedback() {
        let bytes = encode_set("/ch/1/mute", &LeafValue::Bool(true)).unwrap();
        let feedback = decode_packet(&bytes).unwrap();
        assert_eq!(
            feedback,
            vec![Feedback {
                address: "/ch/1/mute".to_string(),
                value: WireValue::Int(1),
            }]
        );
    }

    #[test]
    fn test_query_has_no_feedback() {
        let bytes = encode_query("/ch/1/fdr").unwrap();
        assert!(decode_packet(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_bundle_is_flattened() {
        let packet = OscPacket::Bundle(OscBundle {
            timetag: OscTime::from((0, 1)),
            content: vec![
                OscPacket::Message(OscMessage {
                    addr: "/ch/1/name".to_string(),
                    args: vec![OscType::String("Kick".to_string())],
                }),
                OscPacket::Message(OscMessage {
                    addr: "/ch/2/fdr".to_string(),
                    args: vec![OscType::Float(-6.0)],
                }),
            ],
        });
        let bytes = encoder::encode(&packet).unwrap();
        let feedback = decode_packet(&bytes).unwrap();
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback[0].value, WireValue::Str("Kick".to_string()));
        assert_eq!(feedback[1].address, "/ch/2/fdr");
    }

    #[test]
    fn test_unsupported_argument_is_skipped() {
        let packet = OscPacket::Message(OscMessage {
            addr: "/ch/1/fdr".to_string(),
            args: vec![OscType::Double(1.0)],
        });
        let bytes = encoder::encode(&packet).unwrap();
        assert!(decode_packet(&bytes).unwrap().is_empty());
        assert!(matches!(
            WireValue::try_from(&OscType::Double(1.0)),
            Err(WireError::UnsupportedArgument(_))
        ));
    }

    #[test]
    fn test_mixed_bundle_keeps_valid_reports() {
        let packet = OscPacket::Bundle(OscBundle {
            timetag: OscTime::from((0, 1)),
            content: vec![
                OscPacket::Message(OscMessage {
                    addr: "/ch/1/name".to_string(),
                    args: vec![OscType::String("Kick".to_string())],
                }),
                OscPacket::Message(OscMessage {
                    addr: "/ch/1/x".to_string(),
                    args: vec![OscType::Bool(true)],
                }),
                OscPacket::Message(OscMessage {
                    addr: "/ch/2/fdr".to_string(),
                    args: vec![OscType::Float(-6.0)],
                }),
            ],
        });
        let bytes = encoder::encode(&packet).unwrap();
        let feedback = decode_packet(&bytes).unwrap();
        assert_eq!(
            feedback,
            vec![
                Feedback {
                    address: "/ch/1/name".to_string(),
                    value: WireValue::Str("Kick".to_string()),
                },
                Feedback {
                    address: "/ch/2/fdr".to_string(),
                    value: WireValue::Float(-6.0),
                },
            ]
        );
    }

    #[test]
    fn test_garbage_is_codec_error() {
        assert!(matches!(
            decode_packet(&[0x01, 0x02, 0x03]),
            Err(WireError::Codec(_))
        ));
    }
}
