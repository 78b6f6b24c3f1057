use std::fmt;

use bytes::{Buf, BufMut};
use smcprims_transport::{ParamBuffer, PARAM_STRUCT_SIZE};

use crate::error::{FrameError, Result};
use crate::key::{decode_type_tag, DataType, SmcKey};

/// Size of the payload field of a parameter record.
pub const PAYLOAD_SIZE: usize = 32;

const KEY_INFO_OFFSET: usize = 28;
const RESULT_OFFSET: usize = 40;
const DATA32_OFFSET: usize = 44;
const BYTES_OFFSET: usize = 48;

/// Operation selector carried in the `data8` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Operation {
    /// Read the value of a key.
    ReadKey = 5,
    /// Write the value of a key.
    WriteKey = 6,
    /// Fetch size, type and attributes of a key.
    GetKeyInfo = 9,
}

impl TryFrom<u8> for Operation {
    type Error = FrameError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            5 => Ok(Operation::ReadKey),
            6 => Ok(Operation::WriteKey),
            9 => Ok(Operation::GetKeyInfo),
            other => Err(FrameError::UnknownOperation(other)),
        }
    }
}

/// Status the controller reports in the `result` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmcStatus {
    Success,
    Error,
    KeyNotFound,
    /// Any other device-specific code, preserved verbatim.
    Other(u8),
}

impl SmcStatus {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => SmcStatus::Success,
            1 => SmcStatus::Error,
            0x84 => SmcStatus::KeyNotFound,
            other => SmcStatus::Other(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            SmcStatus::Success => 0,
            SmcStatus::Error => 1,
            SmcStatus::KeyNotFound => 0x84,
            SmcStatus::Other(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        self == SmcStatus::Success
    }
}

impl fmt::Display for SmcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmcStatus::Success => write!(f, "success"),
            SmcStatus::Error => write!(f, "error"),
            SmcStatus::KeyNotFound => write!(f, "key not found"),
            SmcStatus::Other(code) => write!(f, "status {code:#04x}"),
        }
    }
}

/// Key metadata returned by a `GetKeyInfo` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyInfo {
    pub data_size: u32,
    pub data_type: DataType,
    pub data_attributes: u8,
}

/// A structured SMC parameter record.
///
/// The version and power-limit sub-records are never used by this client;
/// they are written as zeros and skipped on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamFrame {
    pub key: u32,
    pub key_info: KeyInfo,
    pub result: u8,
    pub status: u8,
    /// Operation selector.
    pub data8: u8,
    pub data32: u32,
    pub bytes: [u8; PAYLOAD_SIZE],
}

impl Default for ParamFrame {
    fn default() -> Self {
        Self {
            key: 0,
            key_info: KeyInfo::default(),
            result: 0,
            status: 0,
            data8: 0,
            data32: 0,
            bytes: [0; PAYLOAD_SIZE],
        }
    }
}

impl ParamFrame {
    /// A request for `op` on `key`.
    pub fn request(key: SmcKey, op: Operation) -> Self {
        Self {
            key: key.to_u32(),
            data8: op as u8,
            ..Self::default()
        }
    }

    /// Set the declared payload size echoed back to the controller.
    pub fn with_data_size(mut self, data_size: u32) -> Self {
        self.key_info.data_size = data_size;
        self
    }

    /// Copy `payload` into the start of the payload field.
    pub fn with_payload(mut self, payload: &[u8]) -> Result<Self> {
        if payload.len() > PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge {
                size: payload.len(),
                max: PAYLOAD_SIZE,
            });
        }
        self.bytes[..payload.len()].copy_from_slice(payload);
        Ok(self)
    }

    pub fn operation(&self) -> Result<Operation> {
        Operation::try_from(self.data8)
    }

    pub fn smc_status(&self) -> SmcStatus {
        SmcStatus::from_u8(self.result)
    }
}

/// Encode a record into the 80-byte wire layout.
///
/// Wire format (scalars little-endian, as laid out by the driver on
/// both Intel and Apple Silicon hosts):
/// ```text
///  0  key u32            28  keyInfo.dataSize u32    44  data32 u32
///  4  vers (6B) + pad    32  keyInfo.dataType u32    48  bytes[32]
/// 12  pLimitData (16B)   36  keyInfo.attributes + pad
///                        40  result, status, data8, pad
/// ```
pub fn encode_frame(frame: &ParamFrame) -> ParamBuffer {
    let mut out = [0u8; PARAM_STRUCT_SIZE];
    let mut dst = &mut out[..];

    dst.put_u32_le(frame.key);
    dst.put_bytes(0, KEY_INFO_OFFSET - 4);
    dst.put_u32_le(frame.key_info.data_size);
    dst.put_u32_le(frame.key_info.data_type.to_u32());
    dst.put_u8(frame.key_info.data_attributes);
    dst.put_bytes(0, RESULT_OFFSET - (KEY_INFO_OFFSET + 9));
    dst.put_u8(frame.result);
    dst.put_u8(frame.status);
    dst.put_u8(frame.data8);
    dst.put_u8(0);
    dst.put_u32_le(frame.data32);
    dst.put_slice(&frame.bytes);

    out
}

/// Decode a record from the 80-byte wire layout.
pub fn decode_frame(src: &ParamBuffer) -> ParamFrame {
    let mut buf = &src[..];

    let key = buf.get_u32_le();
    buf.advance(KEY_INFO_OFFSET - 4);
    let data_size = buf.get_u32_le();
    let data_type = decode_type_tag(buf.get_u32_le());
    let data_attributes = buf.get_u8();
    buf.advance(RESULT_OFFSET - (KEY_INFO_OFFSET + 9));
    let result = buf.get_u8();
    let status = buf.get_u8();
    let data8 = buf.get_u8();
    buf.advance(DATA32_OFFSET - (RESULT_OFFSET + 3));
    let data32 = buf.get_u32_le();
    debug_assert_eq!(PARAM_STRUCT_SIZE - buf.remaining(), BYTES_OFFSET);
    let mut bytes = [0u8; PAYLOAD_SIZE];
    buf.copy_to_slice(&mut bytes);

    ParamFrame {
        key,
        key_info: KeyInfo {
            data_size,
            data_type,
            data_attributes,
        },
        result,
        status,
        data8,
        data32,
        bytes,
    }
}
