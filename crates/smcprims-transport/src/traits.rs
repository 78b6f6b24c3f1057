use crate::error::Result;

/// Size of one SMC parameter record (`SMCParamStruct`), in bytes.
///
/// Requests and responses share this exact size for the whole protocol.
pub const PARAM_STRUCT_SIZE: usize = 80;

/// A raw, wire-layout parameter record.
pub type ParamBuffer = [u8; PARAM_STRUCT_SIZE];

/// The single call primitive of the SMC channel.
///
/// One request record in, one response record out. Implementations must not
/// retry, buffer, or split records. A non-success channel status is returned
/// as `Err`, so a response whose contents are undefined never reaches the
/// caller.
pub trait SmcTransport {
    /// Exchange one parameter record with the controller (blocking).
    fn call(&mut self, request: &ParamBuffer) -> Result<ParamBuffer>;

    /// Transport name for diagnostics.
    fn transport_name(&self) -> &'static str {
        "smc"
    }
}

impl<T: SmcTransport + ?Sized> SmcTransport for &mut T {
    fn call(&mut self, request: &ParamBuffer) -> Result<ParamBuffer> {
        (**self).call(request)
    }

    fn transport_name(&self) -> &'static str {
        (**self).transport_name()
    }
}

impl<T: SmcTransport + ?Sized> SmcTransport for Box<T> {
    fn call(&mut self, request: &ParamBuffer) -> Result<ParamBuffer> {
        (**self).call(request)
    }

    fn transport_name(&self) -> &'static str {
        (**self).transport_name()
    }
}
