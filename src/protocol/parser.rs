// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Line parser for the console protocol.
//!
//! [`LineReader`] assembles bytes from the serial port into lines, and [`parse_line`] turns one
//! line into a [`Command`].

use crate::protocol::messages::*;

/// Accumulates incoming bytes until a CR or LF terminator.
///
/// Empty lines are skipped. A line longer than `N` bytes is dropped in full, up to and including
/// its terminator.
pub struct LineReader<const N: usize> {
    buf: [u8; N],
    len: usize,
    overflowed: bool,
}

impl<const N: usize> LineReader<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
            overflowed: false,
        }
    }

    /// Process a single incoming byte. Returns the line (without terminator) once complete.
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        match byte {
            b'\r' | b'\n' => {
                let len = self.len;
                let complete = !self.overflowed && len > 0;
                self.len = 0;
                self.overflowed = false;

                if complete {
                    Some(&self.buf[..len])
                } else {
                    None
                }
            }
            _ if self.len == N => {
                self.overflowed = true;
                None
            }
            _ => {
                self.buf[self.len] = byte;
                self.len += 1;
                None
            }
        }
    }

    /// Discard any partial line.
    pub fn reset(&mut self) {
        self.len = 0;
        self.overflowed = false;
    }
}

impl<const N: usize> Default for LineReader<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one request line.
///
/// The line is cut at the first CR, LF or NUL. Returns `None` for empty lines and unknown command
/// letters, which get no reply at all; `Some(Err(_))` carries the error to reply with.
pub fn parse_line(line: &[u8]) -> Option<Result<Command, ErrorCode>> {
    let end = line
        .iter()
        .position(|&b| matches!(b, b'\r' | b'\n' | 0))
        .unwrap_or(line.len());
    let (&letter, arg) = line[..end].split_first()?;

    let command = match letter {
        CMD_SET_PULSE => {
            if arg.is_empty() {
                Err(ErrorCode::MissingPulse)
            } else {
                parse_int(arg)
                    .map(Command::SetPulse)
                    .ok_or(ErrorCode::InvalidPulse)
            }
        }
        CMD_READ_PULSE => no_argument(arg, Command::ReadPulse, ErrorCode::UnexpectedReadArgument),
        CMD_RUNNING => no_argument(
            arg,
            Command::QueryRunning,
            ErrorCode::UnexpectedRunningArgument,
        ),
        CMD_PERCENT_MODE => {
            if arg.is_empty() {
                Ok(Command::QueryPercentMode)
            } else {
                match parse_int(arg) {
                    Some(0) => Ok(Command::SetPercentMode(false)),
                    Some(1) => Ok(Command::SetPercentMode(true)),
                    _ => Err(ErrorCode::InvalidPercentMode),
                }
            }
        }
        CMD_CONTROL_LIST => match arg.first() {
            None => Ok(Command::QuerySelected),
            Some(&ARG_LIST) => Ok(Command::ListDevices),
            Some(_) => parse_int(arg)
                .map(Command::Select)
                .ok_or(ErrorCode::InvalidSelection),
        },
        CMD_TOGGLE => {
            if arg.is_empty() {
                Err(ErrorCode::MissingRunState)
            } else {
                parse_int(arg)
                    .map(Command::SetRunning)
                    .ok_or(ErrorCode::InvalidRunState)
            }
        }
        _ => return None,
    };

    Some(command)
}

fn no_argument(arg: &[u8], command: Command, err: ErrorCode) -> Result<Command, ErrorCode> {
    if arg.is_empty() {
        Ok(command)
    } else {
        Err(err)
    }
}

/// Decimal integer at the start of `arg`; trailing bytes are ignored.
///
/// The argument must begin with a digit (the command letter acts as an implicit `+` sign), and
/// values that overflow `i32` are rejected.
fn parse_int(arg: &[u8]) -> Option<i32> {
    let digits = arg.iter().take_while(|b| b.is_ascii_digit()).count();
    core::str::from_utf8(&arg[..digits]).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed<const N: usize>(reader: &mut LineReader<N>, bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut lines = Vec::new();
        for &b in bytes {
            if let Some(line) = reader.push(b) {
                lines.push(line.to_vec());
            }
        }
        lines
    }

    #[test]
    fn reader_splits_on_cr_and_lf() {
        let mut reader = LineReader::<16>::new();
        let lines = feed(&mut reader, b"S1500\r\nR\nH\r");
        assert_eq!(lines, vec![b"S1500".to_vec(), b"R".to_vec(), b"H".to_vec()]);
    }

    #[test]
    fn reader_holds_partial_line() {
        let mut reader = LineReader::<16>::new();
        assert!(feed(&mut reader, b"S15").is_empty());
        assert_eq!(feed(&mut reader, b"00\n"), vec![b"S1500".to_vec()]);
    }

    #[test]
    fn reader_drops_overlong_line() {
        let mut reader = LineReader::<4>::new();
        assert!(feed(&mut reader, b"S123456\n").is_empty());
        assert_eq!(feed(&mut reader, b"S12\n"), vec![b"S12".to_vec()]);
    }

    #[test]
    fn reader_reset_discards_partial() {
        let mut reader = LineReader::<8>::new();
        feed(&mut reader, b"S99");
        reader.reset();
        assert_eq!(feed(&mut reader, b"R\n"), vec![b"R".to_vec()]);
    }

    #[test]
    fn set_pulse() {
        assert_eq!(parse_line(b"S50"), Some(Ok(Command::SetPulse(50))));
        assert_eq!(parse_line(b"S1500\r\n"), Some(Ok(Command::SetPulse(1500))));
        assert_eq!(parse_line(b"S50x"), Some(Ok(Command::SetPulse(50))));
        assert_eq!(parse_line(b"S"), Some(Err(ErrorCode::MissingPulse)));
        assert_eq!(parse_line(b"S\r\n"), Some(Err(ErrorCode::MissingPulse)));
        assert_eq!(parse_line(b"Sabc"), Some(Err(ErrorCode::InvalidPulse)));
        assert_eq!(parse_line(b"S-5"), Some(Err(ErrorCode::InvalidPulse)));
        assert_eq!(parse_line(b"S 5"), Some(Err(ErrorCode::InvalidPulse)));
        assert_eq!(
            parse_line(b"S99999999999"),
            Some(Err(ErrorCode::InvalidPulse))
        );
    }

    #[test]
    fn read_and_running_take_no_argument() {
        assert_eq!(parse_line(b"R"), Some(Ok(Command::ReadPulse)));
        assert_eq!(
            parse_line(b"R1"),
            Some(Err(ErrorCode::UnexpectedReadArgument))
        );
        assert_eq!(parse_line(b"H\n"), Some(Ok(Command::QueryRunning)));
        assert_eq!(
            parse_line(b"Hx"),
            Some(Err(ErrorCode::UnexpectedRunningArgument))
        );
    }

    #[test]
    fn percent_mode() {
        assert_eq!(parse_line(b"P"), Some(Ok(Command::QueryPercentMode)));
        assert_eq!(parse_line(b"P0"), Some(Ok(Command::SetPercentMode(false))));
        assert_eq!(parse_line(b"P1"), Some(Ok(Command::SetPercentMode(true))));
        assert_eq!(parse_line(b"P2"), Some(Err(ErrorCode::InvalidPercentMode)));
        assert_eq!(parse_line(b"Px"), Some(Err(ErrorCode::InvalidPercentMode)));
    }

    #[test]
    fn control_list() {
        assert_eq!(parse_line(b"C"), Some(Ok(Command::QuerySelected)));
        assert_eq!(parse_line(b"CL"), Some(Ok(Command::ListDevices)));
        assert_eq!(parse_line(b"C3"), Some(Ok(Command::Select(3))));
        assert_eq!(parse_line(b"Cx"), Some(Err(ErrorCode::InvalidSelection)));
    }

    #[test]
    fn toggle() {
        assert_eq!(parse_line(b"T"), Some(Err(ErrorCode::MissingRunState)));
        assert_eq!(parse_line(b"T0"), Some(Ok(Command::SetRunning(0))));
        assert_eq!(parse_line(b"T2"), Some(Ok(Command::SetRunning(2))));
        assert_eq!(parse_line(b"T?"), Some(Err(ErrorCode::InvalidRunState)));
    }

    #[test]
    fn unknown_and_empty_lines_are_ignored() {
        assert_eq!(parse_line(b"Z"), None);
        assert_eq!(parse_line(b"s50"), None);
        assert_eq!(parse_line(b""), None);
        assert_eq!(parse_line(b"\r\n"), None);
    }

    #[test]
    fn nul_terminates_line() {
        assert_eq!(parse_line(b"R\0junk"), Some(Ok(Command::ReadPulse)));
    }
}
