//! Host syscall dispatch.
//!
//! The guest requests a service by loading an id into `a0` (`gpi[1]`) and
//! its arguments into `a1..a3`, then issuing `SYSCALL`. The result replaces
//! `a0`. Buffers are passed as guest addresses and resolved against guest
//! memory.

use std::io::{Read, Write};

use altairx_core::{Core, MemoryError};
use thiserror::Error;

/// Register index of the syscall id / result slot (`a0`).
const ARG_BASE: usize = 1;

/// Host-side failures while servicing a guest syscall.
#[derive(Debug, Error)]
pub enum HostError {
    /// The guest passed a file handle other than stdin/stdout/stderr.
    #[error("invalid file handle {0}")]
    BadFileHandle(u64),
    /// The guest requested an unknown service.
    #[error("unknown syscall id {0}")]
    UnknownSyscall(u64),
    /// A guest buffer did not resolve to mapped memory.
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// The host stream operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Services one latched syscall.
///
/// # Errors
///
/// Fails when the request names an unknown service, an invalid file handle,
/// or an unmapped guest buffer.
pub fn dispatch(core: &mut Core) -> Result<(), HostError> {
    let args = {
        let gpi = &core.registers().gpi;
        [
            gpi[ARG_BASE],
            gpi[ARG_BASE + 1],
            gpi[ARG_BASE + 2],
            gpi[ARG_BASE + 3],
        ]
    };

    match args[0] {
        // exit(code)
        1 => std::process::exit(args[1] as i32),
        // stdio_read(handle, buffer, length)
        2 => {
            let length = usize::try_from(args[3]).unwrap_or(0);
            let buffer = core.memory_mut().slice_mut(args[2], length)?;
            let read = match args[1] {
                0 => std::io::stdin().read(buffer)?,
                handle => return Err(HostError::BadFileHandle(handle)),
            };
            core.registers_mut().gpi[ARG_BASE] = read as u64;
        }
        // stdio_write(handle, buffer, length)
        3 => {
            let length = usize::try_from(args[3]).unwrap_or(0);
            let buffer = core.memory_mut().slice_mut(args[2], length)?;
            let written = match args[1] {
                1 => {
                    let mut stdout = std::io::stdout();
                    let written = stdout.write(buffer)?;
                    stdout.flush()?;
                    written
                }
                2 => {
                    let mut stderr = std::io::stderr();
                    let written = stderr.write(buffer)?;
                    stderr.flush()?;
                    written
                }
                handle => return Err(HostError::BadFileHandle(handle)),
            };
            core.registers_mut().gpi[ARG_BASE] = written as u64;
        }
        id => return Err(HostError::UnknownSyscall(id)),
    }

    Ok(())
}
