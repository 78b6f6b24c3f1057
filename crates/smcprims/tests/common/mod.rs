#![allow(dead_code)]

use std::collections::BTreeMap;

use smcprims::frame::{decode_frame, encode_frame, DataType, Operation, ParamFrame, SmcKey, SmcStatus};
use smcprims::transport::{IoReturn, ParamBuffer, SmcTransport, TransportError};

/// A controller simulated from a key table.
///
/// Like the real driver, a read or write whose declared size differs from
/// the key's size is refused with a protocol error.
#[derive(Default)]
pub struct SimulatedSmc {
    keys: BTreeMap<u32, (DataType, Vec<u8>)>,
    channel_down: bool,
    pub info_calls: usize,
    pub read_calls: usize,
    pub write_calls: usize,
}

impl SimulatedSmc {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small laptop: one CPU sensor, two fans.
    pub fn laptop() -> Self {
        Self::new()
            .key("TC0D", DataType::SP78, &[50, 0x00])
            .key("FNum", DataType::UI8, &[2])
            .key("F0Ac", DataType::FPE2, &[0x10, 0x00])
            .key("F1Ac", DataType::FPE2, &[0x18, 0x00])
            .key("F0Mn", DataType::FPE2, &[0x07, 0x40])
            .key("F1Mn", DataType::FPE2, &[0x07, 0x40])
    }

    pub fn key(mut self, key: &str, data_type: DataType, bytes: &[u8]) -> Self {
        let id = SmcKey::new(key).expect("valid test key").to_u32();
        self.keys.insert(id, (data_type, bytes.to_vec()));
        self
    }

    /// Make every call fail at the channel level.
    pub fn channel_down(mut self) -> Self {
        self.channel_down = true;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.info_calls + self.read_calls + self.write_calls
    }

    pub fn value(&self, key: &str) -> Vec<u8> {
        let id = SmcKey::new(key).expect("valid test key").to_u32();
        self.keys.get(&id).map(|(_, b)| b.clone()).unwrap_or_default()
    }

    fn handle(&mut self, request: &ParamFrame) -> ParamFrame {
        let mut response = ParamFrame {
            key: request.key,
            ..ParamFrame::default()
        };
        let status = match (request.operation(), self.keys.get_mut(&request.key)) {
            (Ok(_), None) => SmcStatus::KeyNotFound,
            (Ok(Operation::GetKeyInfo), Some((data_type, bytes))) => {
                response.key_info.data_size = bytes.len() as u32;
                response.key_info.data_type = *data_type;
                SmcStatus::Success
            }
            (Ok(Operation::ReadKey), Some((_, bytes))) => {
                if request.key_info.data_size as usize == bytes.len() {
                    response.bytes[..bytes.len()].copy_from_slice(bytes);
                    SmcStatus::Success
                } else {
                    SmcStatus::Error
                }
            }
            (Ok(Operation::WriteKey), Some((_, bytes))) => {
                let size = request.key_info.data_size as usize;
                if size == bytes.len() {
                    bytes.copy_from_slice(&request.bytes[..size]);
                    SmcStatus::Success
                } else {
                    SmcStatus::Error
                }
            }
            (Err(_), _) => SmcStatus::Error,
        };
        response.result = status.to_u8();
        response
    }
}

impl SmcTransport for SimulatedSmc {
    fn call(&mut self, request: &ParamBuffer) -> Result<ParamBuffer, TransportError> {
        let request = decode_frame(request);
        match request.operation() {
            Ok(Operation::GetKeyInfo) => self.info_calls += 1,
            Ok(Operation::ReadKey) => self.read_calls += 1,
            Ok(Operation::WriteKey) => self.write_calls += 1,
            Err(_) => {}
        }
        if self.channel_down {
            return Err(TransportError::Call {
                code: IoReturn::NOT_OPEN,
            });
        }
        Ok(encode_frame(&self.handle(&request)))
    }

    fn transport_name(&self) -> &'static str {
        "simulated-smc"
    }
}
