//! JSON codec for requests and stats.
//!
//! The persistence layer hands requests over as JSON; stats go back the same way.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::PersistenceRequest;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

pub fn decode_request(bytes: &[u8]) -> Result<PersistenceRequest, CodecError> {
    decode(bytes)
}

pub fn encode<T: Serialize>(value: &T, pretty: bool) -> Result<String, CodecError> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.map_err(CodecError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MutableStateUpdateSessionStats;

    #[test]
    fn decode_request_reads_create() {
        let json = br#"
        {
          "create": {
            "new_workflow_snapshot": {
              "execution_info": {
                "workflow_id": "wf",
                "task_list": "tl",
                "workflow_type_name": "type"
              },
              "timer_infos": [{ "timer_id": "t1" }]
            }
          }
        }"#;
        let request = decode_request(json).expect("decode");
        match request {
            PersistenceRequest::Create(req) => {
                assert_eq!(req.new_workflow_snapshot.timer_infos.len(), 1)
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn decode_unknown_op_is_error() {
        let err = decode_request(br#"{ "delete": {} }"#).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
        assert!(err.to_string().starts_with("decode failed"));
    }

    #[test]
    fn encode_compact_has_no_newlines() {
        let s = encode(&MutableStateUpdateSessionStats::default(), false).unwrap();
        assert!(!s.contains('\n'));
        assert!(s.contains("\"mutable_state_size\":0"));
    }
}
