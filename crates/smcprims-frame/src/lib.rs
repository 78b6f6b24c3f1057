//! Key codec, numeric formats, and parameter record layout for the SMC.
//!
//! Every SMC request and response is one fixed 80-byte record:
//! - a 4-character key packed big-endian into a `u32`
//! - an operation selector (get key info / read / write)
//! - a key-info sub-record (payload size and 4-character data type)
//! - a protocol status byte set by the controller
//! - a 32-byte payload field
//!
//! [`ParamFrame`] is the structured form; [`encode_frame`] and
//! [`decode_frame`] convert to the literal layout at the transport boundary.

pub mod codec;
pub mod error;
pub mod key;
pub mod numeric;
pub mod value;

pub use codec::{decode_frame, encode_frame, KeyInfo, Operation, ParamFrame, SmcStatus, PAYLOAD_SIZE};
pub use error::{FrameError, KeyError, Result};
pub use key::{decode_type_tag, encode_key, DataType, SmcKey, KEY_SIZE};
pub use value::RawValue;
