//! Two-phase read and write transactions.
//!
//! Every access starts with a `GetKeyInfo` call. The controller uses it to
//! prime the following data call, so the phase is never skipped, even when
//! the caller already knows the size and type of a key.
//!
//! ```text
//! read:  Idle -> AwaitingKeyInfo -> AwaitingPayload  -> Done
//! write: Idle -> AwaitingKeyInfo -> AwaitingWriteAck -> Done
//! ```

use smcprims_frame::{
    decode_frame, encode_frame, KeyInfo, Operation, ParamFrame, RawValue, SmcKey,
};
use smcprims_transport::SmcTransport;
use tracing::{debug, trace};

use crate::error::{Phase, TransactionError};

pub type Result<T> = std::result::Result<T, TransactionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    AwaitingKeyInfo,
    AwaitingPayload,
    AwaitingWriteAck,
    Done,
}

struct Machine {
    key: SmcKey,
    state: State,
}

impl Machine {
    fn new(key: SmcKey) -> Self {
        Self {
            key,
            state: State::Idle,
        }
    }

    fn advance(&mut self, next: State) {
        trace!(key = %self.key, from = ?self.state, to = ?next, "transaction state");
        self.state = next;
    }
}

/// Read the value of `key`.
pub fn read_key<T: SmcTransport + ?Sized>(transport: &mut T, key: SmcKey) -> Result<RawValue> {
    let mut machine = Machine::new(key);

    machine.advance(State::AwaitingKeyInfo);
    let info = key_info(transport, key)?;

    machine.advance(State::AwaitingPayload);
    let request = ParamFrame::request(key, Operation::ReadKey).with_data_size(info.data_size);
    let response = exchange(transport, &request, Phase::ReadPayload)?;

    machine.advance(State::Done);
    let value = RawValue::from_payload(info.data_size, info.data_type, response.bytes);
    debug!(
        transport = transport.transport_name(),
        %key,
        data_size = value.data_size(),
        data_type = %value.data_type(),
        "read key"
    );
    Ok(value)
}

/// Write `value` to `key`.
///
/// The value's size must match the size the controller reports for the key;
/// otherwise [`TransactionError::BadArgument`] is returned and nothing is
/// written.
pub fn write_key<T: SmcTransport + ?Sized>(
    transport: &mut T,
    key: SmcKey,
    value: &RawValue,
) -> Result<()> {
    let mut machine = Machine::new(key);

    machine.advance(State::AwaitingKeyInfo);
    let info = key_info(transport, key)?;

    if value.data_size() != info.data_size {
        debug!(
            %key,
            expected = info.data_size,
            actual = value.data_size(),
            "write size mismatch"
        );
        return Err(TransactionError::BadArgument {
            expected: info.data_size,
            actual: value.data_size(),
        });
    }

    machine.advance(State::AwaitingWriteAck);
    let request = ParamFrame::request(key, Operation::WriteKey)
        .with_data_size(info.data_size)
        .with_payload(value.bytes())
        .map_err(|_| TransactionError::BadArgument {
            expected: info.data_size,
            actual: value.data_size(),
        })?;
    exchange(transport, &request, Phase::WritePayload)?;

    machine.advance(State::Done);
    debug!(
        transport = transport.transport_name(),
        %key,
        data_size = info.data_size,
        "wrote key"
    );
    Ok(())
}

/// Fetch the metadata of `key` without reading its value.
pub fn key_info<T: SmcTransport + ?Sized>(transport: &mut T, key: SmcKey) -> Result<KeyInfo> {
    let request = ParamFrame::request(key, Operation::GetKeyInfo);
    let response = exchange(transport, &request, Phase::KeyInfo)?;
    Ok(response.key_info)
}

fn exchange<T: SmcTransport + ?Sized>(
    transport: &mut T,
    request: &ParamFrame,
    phase: Phase,
) -> Result<ParamFrame> {
    let raw = transport.call(&encode_frame(request)).map_err(|source| {
        debug!(
            transport = transport.transport_name(),
            %phase,
            %source,
            "SMC channel call failed"
        );
        TransactionError::Channel { phase, source }
    })?;

    let response = decode_frame(&raw);
    let status = response.smc_status();
    if !status.is_success() {
        return Err(TransactionError::Protocol { phase, status });
    }
    Ok(response)
}
