use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::protocol::{Frame, MessageKind, OutboundMessage, Validate};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("frame is not valid JSON: {0}")]
    Frame(serde_json::Error),
    #[error("unknown event `{0}`")]
    UnknownEvent(String),
    #[error("malformed {kind} payload: {source}")]
    Malformed {
        kind: MessageKind,
        source: serde_json::Error,
    },
    #[error("invalid {kind} payload: {reason}")]
    Invalid {
        kind: MessageKind,
        reason: &'static str,
    },
    #[error("failed to encode {kind}: {source}")]
    Encode {
        kind: MessageKind,
        source: serde_json::Error,
    },
}

pub fn decode_payload<T>(kind: MessageKind, payload: Value) -> Result<T, CodecError>
where
    T: DeserializeOwned + Validate,
{
    let decoded: T =
        serde_json::from_value(payload).map_err(|source| CodecError::Malformed { kind, source })?;
    decoded
        .validate()
        .map_err(|reason| CodecError::Invalid { kind, reason })?;
    Ok(decoded)
}

pub fn inbound_kind(frame: &Frame) -> Result<MessageKind, CodecError> {
    MessageKind::inbound_from_event(&frame.event)
        .ok_or_else(|| CodecError::UnknownEvent(frame.event.clone()))
}

pub fn encode(message: &OutboundMessage) -> Result<Frame, CodecError> {
    let kind = message.kind();
    let payload = match message {
        OutboundMessage::PlayerMovement(info) => to_payload(kind, info)?,
        OutboundMessage::PickupCreated(info) => to_payload(kind, info)?,
        OutboundMessage::PickupTaken { id } => serde_json::json!({ "id": id }),
        OutboundMessage::BulletFired(info) => to_payload(kind, info)?,
        OutboundMessage::GameOver | OutboundMessage::GuestReady => return Ok(Frame::empty(kind)),
    };
    Ok(Frame::new(kind, payload))
}

fn to_payload<T: Serialize>(kind: MessageKind, payload: &T) -> Result<Value, CodecError> {
    serde_json::to_value(payload).map_err(|source| CodecError::Encode { kind, source })
}

pub fn frame_to_text(frame: &Frame) -> Result<String, CodecError> {
    serde_json::to_string(frame).map_err(CodecError::Frame)
}

pub fn frame_from_text(text: &str) -> Result<Frame, CodecError> {
    serde_json::from_str(text).map_err(CodecError::Frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::protocol::{BulletInfo, PickupInfo, PlayerMovedInfo};

    #[test]
    fn missing_field_is_malformed() {
        let err = decode_payload::<BulletInfo>(
            MessageKind::BulletIncoming,
            serde_json::json!({ "x": 1.0, "y": 2.0, "facingLeft": false }),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CodecError::Malformed {
                kind: MessageKind::BulletIncoming,
                ..
            }
        ));
    }

    #[test]
    fn empty_id_is_invalid() {
        let err = decode_payload::<PlayerMovedInfo>(
            MessageKind::PlayerMoved,
            serde_json::json!({
                "playerId": " ",
                "x": 1.0,
                "y": 2.0,
                "facingLeft": false,
                "currentWeapon": { "name": null, "holding": false },
                "run": false,
            }),
        )
        .unwrap_err();

        assert!(matches!(err, CodecError::Invalid { .. }));
    }

    #[test]
    fn encodes_every_field() {
        let frame = encode(&OutboundMessage::BulletFired(BulletInfo {
            x: 1.0,
            y: 2.0,
            facing_left: true,
            enemy_bullet: true,
        }))
        .unwrap();

        assert_eq!(frame.event, "bulletFired");
        assert_eq!(
            frame.payload,
            serde_json::json!({ "x": 1.0, "y": 2.0, "facingLeft": true, "enemyBullet": true })
        );

        let frame = encode(&OutboundMessage::PickupTaken { id: 3 }).unwrap();
        assert_eq!(frame.payload, serde_json::json!({ "id": 3 }));

        let frame = encode(&OutboundMessage::GameOver).unwrap();
        assert_eq!(frame.event, "gameOver");
        assert_eq!(frame.payload, serde_json::json!({}));
    }

    #[test]
    fn text_framing() {
        let frame = encode(&OutboundMessage::PickupCreated(PickupInfo {
            x: 100.0,
            y: 100.0,
            id: 1,
        }))
        .unwrap();

        let text = frame_to_text(&frame).unwrap();
        assert_eq!(frame_from_text(&text).unwrap(), frame);

        assert!(matches!(frame_from_text("{"), Err(CodecError::Frame(_))));
    }

    #[test]
    fn unknown_event() {
        let frame = Frame::empty(MessageKind::GameOver);
        assert!(matches!(
            inbound_kind(&frame),
            Err(CodecError::UnknownEvent(name)) if name == "gameOver"
        ));
    }

    #[test]
    fn frame_without_payload_defaults_to_null() {
        let frame = frame_from_text(r#"{ "event": "gameHasEnded" }"#).unwrap();
        assert_eq!(inbound_kind(&frame).unwrap(), MessageKind::GameEnded);
        assert!(frame.payload.is_null());
    }
}
