//! In-memory controller used by unit tests.

use std::collections::HashMap;

use smcprims_frame::{
    decode_frame, encode_frame, DataType, Operation, ParamFrame, SmcKey, SmcStatus, PAYLOAD_SIZE,
};
use smcprims_transport::{IoReturn, ParamBuffer, Result, SmcTransport, TransportError};

struct Entry {
    data_type: DataType,
    bytes: Vec<u8>,
}

/// Answers requests from a key table and records every request it sees.
#[derive(Default)]
pub(crate) struct FakeSmc {
    keys: HashMap<u32, Entry>,
    fail_channel_on: Option<(Operation, IoReturn)>,
    fail_status_on: Option<(Operation, SmcStatus)>,
    pub(crate) requests: Vec<ParamFrame>,
}

impl FakeSmc {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_key(mut self, key: &str, data_type: DataType, bytes: &[u8]) -> Self {
        let key = SmcKey::new(key).expect("test key must be valid");
        self.keys.insert(
            key.to_u32(),
            Entry {
                data_type,
                bytes: bytes.to_vec(),
            },
        );
        self
    }

    pub(crate) fn fail_channel_on(mut self, op: Operation, code: IoReturn) -> Self {
        self.fail_channel_on = Some((op, code));
        self
    }

    pub(crate) fn fail_status_on(mut self, op: Operation, status: SmcStatus) -> Self {
        self.fail_status_on = Some((op, status));
        self
    }

    pub(crate) fn calls(&self, op: Operation) -> usize {
        self.requests
            .iter()
            .filter(|frame| frame.data8 == op as u8)
            .count()
    }

    pub(crate) fn stored(&self, key: &str) -> Option<&[u8]> {
        let key = SmcKey::new(key).ok()?;
        self.keys.get(&key.to_u32()).map(|e| e.bytes.as_slice())
    }

    fn answer(&mut self, request: &ParamFrame) -> ParamFrame {
        let mut response = ParamFrame {
            key: request.key,
            data8: request.data8,
            ..ParamFrame::default()
        };
        let op = request.operation().expect("engine sent unknown operation");

        if let Some((fail_op, status)) = self.fail_status_on {
            if fail_op == op {
                response.result = status.to_u8();
                return response;
            }
        }

        let Some(entry) = self.keys.get_mut(&request.key) else {
            response.result = SmcStatus::KeyNotFound.to_u8();
            return response;
        };

        match op {
            Operation::GetKeyInfo => {
                response.key_info.data_size = entry.bytes.len() as u32;
                response.key_info.data_type = entry.data_type;
            }
            Operation::ReadKey => {
                if request.key_info.data_size as usize != entry.bytes.len() {
                    response.result = SmcStatus::Error.to_u8();
                    return response;
                }
                response.bytes[..entry.bytes.len()].copy_from_slice(&entry.bytes);
            }
            Operation::WriteKey => {
                let size = request.key_info.data_size as usize;
                if size != entry.bytes.len() || size > PAYLOAD_SIZE {
                    response.result = SmcStatus::Error.to_u8();
                    return response;
                }
                entry.bytes = request.bytes[..size].to_vec();
            }
        }
        response.result = SmcStatus::Success.to_u8();
        response
    }
}

impl SmcTransport for FakeSmc {
    fn call(&mut self, request: &ParamBuffer) -> Result<ParamBuffer> {
        let request = decode_frame(request);
        self.requests.push(request.clone());

        if let Some((op, code)) = self.fail_channel_on {
            if request.data8 == op as u8 {
                return Err(TransportError::Call { code });
            }
        }

        let response = self.answer(&request);
        Ok(encode_frame(&response))
    }
}
