use std::ffi::CString;

use libc::{c_char, c_int, c_uint, c_void, size_t};
use tracing::{debug, info};

use crate::error::{IoReturn, Result, TransportError};
use crate::traits::{ParamBuffer, SmcTransport, PARAM_STRUCT_SIZE};

type MachPort = c_uint;
type IoObject = MachPort;
type IoService = IoObject;
type IoConnect = IoObject;
type KernReturn = c_int;

/// `MACH_PORT_NULL` selects the default IOKit main port.
const MAIN_PORT_DEFAULT: MachPort = 0;

#[link(name = "IOKit", kind = "framework")]
extern "C" {
    fn IOServiceMatching(name: *const c_char) -> *mut c_void;
    fn IOServiceGetMatchingService(main_port: MachPort, matching: *mut c_void) -> IoService;
    fn IOServiceOpen(
        service: IoService,
        owning_task: MachPort,
        connect_type: u32,
        connect: *mut IoConnect,
    ) -> KernReturn;
    fn IOServiceClose(connect: IoConnect) -> KernReturn;
    fn IOObjectRelease(object: IoObject) -> KernReturn;
    fn IOConnectCallStructMethod(
        connection: MachPort,
        selector: u32,
        input: *const c_void,
        input_cnt: size_t,
        output: *mut c_void,
        output_cnt: *mut size_t,
    ) -> KernReturn;
}

extern "C" {
    static mach_task_self_: MachPort;
}

/// An open user-client connection to the `AppleSMC` kernel driver.
///
/// Opening usually works unprivileged; writes need root. The connection is
/// closed on drop if [`AppleSmc::close`] was not called.
pub struct AppleSmc {
    conn: IoConnect,
    service: String,
}

impl AppleSmc {
    /// IOKit service name of the SMC driver.
    pub const SERVICE_NAME: &'static str = "AppleSMC";
    /// `kSMCHandleYPCEvent`: the struct method that carries every request.
    pub const HANDLE_YPC_EVENT: u32 = 2;

    /// Open a connection to the `AppleSMC` service.
    pub fn open() -> Result<Self> {
        Self::open_service(Self::SERVICE_NAME)
    }

    /// Open a connection to a named SMC-compatible service.
    pub fn open_service(name: &str) -> Result<Self> {
        let c_name = CString::new(name).map_err(|_| TransportError::ServiceNotFound {
            service: name.to_string(),
        })?;

        // SAFETY: `c_name` is a valid NUL-terminated string for the duration of the call.
        // The returned dictionary is consumed by IOServiceGetMatchingService.
        let service = unsafe {
            let matching = IOServiceMatching(c_name.as_ptr());
            IOServiceGetMatchingService(MAIN_PORT_DEFAULT, matching)
        };
        if service == 0 {
            return Err(TransportError::ServiceNotFound {
                service: name.to_string(),
            });
        }

        let mut conn: IoConnect = 0;
        // SAFETY: `service` is a valid object returned above and released exactly once;
        // `conn` is a valid out-pointer.
        let rc = unsafe {
            let rc = IOServiceOpen(service, mach_task_self_, 0, &mut conn);
            IOObjectRelease(service);
            rc
        };

        let code = IoReturn::from_raw(rc);
        if !code.is_success() {
            return Err(TransportError::Open {
                service: name.to_string(),
                code,
            });
        }

        info!(service = name, "opened SMC connection");
        Ok(Self {
            conn,
            service: name.to_string(),
        })
    }

    /// Name of the service this connection was opened on.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Close the connection explicitly, surfacing the close status.
    pub fn close(self) -> Result<()> {
        // Drop must not close the connection a second time.
        let mut this = std::mem::ManuallyDrop::new(self);
        let service = std::mem::take(&mut this.service);
        close_connection(this.conn, &service)
    }
}

fn close_connection(conn: IoConnect, service: &str) -> Result<()> {
    // SAFETY: `conn` was produced by IOServiceOpen; every owner closes it exactly once.
    let code = IoReturn::from_raw(unsafe { IOServiceClose(conn) });
    if !code.is_success() {
        return Err(TransportError::Close { code });
    }
    info!(service, "closed SMC connection");
    Ok(())
}

impl SmcTransport for AppleSmc {
    fn call(&mut self, request: &ParamBuffer) -> Result<ParamBuffer> {
        let mut response = [0u8; PARAM_STRUCT_SIZE];
        let mut response_len: size_t = PARAM_STRUCT_SIZE;

        // SAFETY: both buffers are exactly PARAM_STRUCT_SIZE bytes and live for the call;
        // `response_len` tells the driver how much it may write.
        let rc = unsafe {
            IOConnectCallStructMethod(
                self.conn,
                Self::HANDLE_YPC_EVENT,
                request.as_ptr().cast::<c_void>(),
                PARAM_STRUCT_SIZE,
                response.as_mut_ptr().cast::<c_void>(),
                &mut response_len,
            )
        };

        let code = IoReturn::from_raw(rc);
        if !code.is_success() {
            debug!(%code, "SMC struct method failed");
            return Err(TransportError::Call { code });
        }
        Ok(response)
    }

    fn transport_name(&self) -> &'static str {
        "iokit-apple-smc"
    }
}

impl Drop for AppleSmc {
    fn drop(&mut self) {
        if let Err(err) = close_connection(self.conn, &self.service) {
            debug!(%err, "SMC connection close on drop failed");
        }
    }
}

impl std::fmt::Debug for AppleSmc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppleSmc")
            .field("service", &self.service)
            .field("conn", &self.conn)
            .finish()
    }
}
