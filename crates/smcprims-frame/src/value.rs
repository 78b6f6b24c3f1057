use tracing::debug;

use crate::codec::PAYLOAD_SIZE;
use crate::error::{FrameError, Result};
use crate::key::DataType;

/// A key's value together with the metadata describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    data_size: u32,
    data_type: DataType,
    bytes: [u8; PAYLOAD_SIZE],
}

impl RawValue {
    /// Build a value from caller bytes. `data_size` is `bytes.len()`.
    pub fn new(data_type: DataType, bytes: &[u8]) -> Result<Self> {
        if bytes.len() > PAYLOAD_SIZE {
            return Err(FrameError::PayloadTooLarge {
                size: bytes.len(),
                max: PAYLOAD_SIZE,
            });
        }
        let mut buf = [0u8; PAYLOAD_SIZE];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            data_size: bytes.len() as u32,
            data_type,
            bytes: buf,
        })
    }

    /// Build a value from a full payload field as returned by the controller.
    ///
    /// A `data_size` beyond the field is clamped; the controller never
    /// reports more than 32 bytes.
    pub fn from_payload(data_size: u32, data_type: DataType, bytes: [u8; PAYLOAD_SIZE]) -> Self {
        if data_size as usize > PAYLOAD_SIZE {
            debug!(data_size, %data_type, "reported size exceeds payload field; clamping");
        }
        Self {
            data_size: data_size.min(PAYLOAD_SIZE as u32),
            data_type,
            bytes,
        }
    }

    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The first `data_size` payload bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.data_size as usize]
    }

    /// Whether the value has exactly the given size and type.
    pub fn has_shape(&self, data_size: u32, data_type: DataType) -> bool {
        self.data_size == data_size && self.data_type == data_type
    }

    /// The payload as a fixed array, if it is exactly `N` bytes long.
    pub fn to_array<const N: usize>(&self) -> Option<[u8; N]> {
        self.bytes().try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_size_from_bytes() {
        let value = RawValue::new(DataType::FPE2, &[0x10, 0x00]).unwrap();
        assert_eq!(value.data_size(), 2);
        assert_eq!(value.bytes(), &[0x10, 0x00]);
        assert!(value.has_shape(2, DataType::FPE2));
        assert!(!value.has_shape(2, DataType::SP78));
    }

    #[test]
    fn new_rejects_oversized_payload() {
        let result = RawValue::new(DataType::FLT, &[0u8; 40]);
        assert!(matches!(
            result,
            Err(FrameError::PayloadTooLarge { size: 40, max: 32 })
        ));
    }

    #[test]
    fn from_payload_truncates_to_size() {
        let mut payload = [0xee; PAYLOAD_SIZE];
        payload[0] = 4;
        let value = RawValue::from_payload(1, DataType::UI8, payload);
        assert_eq!(value.bytes(), &[4]);
        assert_eq!(value.to_array::<1>(), Some([4]));
        assert_eq!(value.to_array::<2>(), None);
    }

    #[test]
    fn from_payload_clamps_oversized_size() {
        let value = RawValue::from_payload(200, DataType::FLT, [0; PAYLOAD_SIZE]);
        assert_eq!(value.bytes().len(), PAYLOAD_SIZE);
    }
}
