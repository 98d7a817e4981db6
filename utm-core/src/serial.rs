//! Serial line assembly
//!
//! Lines are pulled from a byte stream without blocking when idle. Once the
//! first byte is available, the reader drains until a terminator, a full
//! buffer or the line timeout, whichever comes first. While it waits for
//! the rest of a line it hands the current time to an idle hook so motion
//! keeps being serviced.

use embedded_io::{Read, ReadReady};
use utm_protocol::CommandLine;

use crate::timing::elapsed_ms;
use crate::traits::Clock;

/// Try to assemble one command line from `port`
///
/// Returns `false` straight away when nothing is waiting. Otherwise returns
/// `true` if at least one payload byte was captured into `line`. A port error
/// ends the line early, like a timeout. `idle` runs with the current time
/// whenever the next byte has not arrived yet.
pub fn read_line<P, C, F>(
    port: &mut P,
    clock: &C,
    line: &mut CommandLine,
    timeout_ms: u32,
    mut idle: F,
) -> bool
where
    P: Read + ReadReady,
    C: Clock + ?Sized,
    F: FnMut(u32),
{
    if !matches!(port.read_ready(), Ok(true)) {
        return false;
    }

    line.clear();
    let start_ms = clock.now_ms();

    while !line.is_full() {
        match port.read_ready() {
            Ok(true) => {
                let mut byte = [0u8; 1];
                match port.read(&mut byte) {
                    Ok(1) => {
                        if byte[0] == b'\n' || byte[0] == b'\r' {
                            break;
                        }
                        if line.push(byte[0]).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
            Ok(false) => idle(clock.now_ms()),
            Err(_) => break,
        }

        if elapsed_ms(start_ms, clock.now_ms()) > timeout_ms {
            break;
        }
    }

    !line.is_empty()
}
