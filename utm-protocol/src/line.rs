//! Command line buffer and tokenizing
//!
//! A command line is a verb optionally followed by a space and a decimal
//! parameter. The buffer is bounded: the wire budget is 64 bytes including
//! the terminator, so at most 63 payload bytes are kept.

use heapless::Vec;

/// Size of the command buffer including the terminator slot
pub const COMMAND_BUFFER_SIZE: usize = 64;

/// Maximum number of payload bytes in one command line
pub const LINE_CAPACITY: usize = COMMAND_BUFFER_SIZE - 1;

/// Errors that can occur while filling a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// No room left for another byte
    Full,
}

/// The most recently received command line
///
/// Text after an embedded NUL byte is ignored by every query, matching the
/// behavior of a NUL-terminated buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    bytes: Vec<u8, LINE_CAPACITY>,
}

impl CommandLine {
    /// Create an empty command line
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Build a command line from raw bytes, truncating to capacity
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut line = Self::new();
        for &b in bytes.iter().take(LINE_CAPACITY) {
            let _ = line.push(b);
        }
        line
    }

    /// Discard the current contents
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Append one byte
    pub fn push(&mut self, byte: u8) -> Result<(), LineError> {
        self.bytes.push(byte).map_err(|_| LineError::Full)
    }

    /// Check if no more bytes fit
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    /// Number of bytes collected (including anything after a NUL)
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if no bytes were collected
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The effective line text, up to the first NUL byte
    pub fn text(&self) -> &[u8] {
        match self.bytes.iter().position(|&b| b == 0) {
            Some(end) => &self.bytes[..end],
            None => &self.bytes,
        }
    }

    /// Exact, case-sensitive comparison of the whole line
    pub fn matches(&self, verb: &str) -> bool {
        self.text() == verb.as_bytes()
    }

    /// Check if the line starts with `prefix`
    ///
    /// No separator is required, so `SetSpeed100` matches `SetSpeed`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.text().starts_with(prefix.as_bytes())
    }

    /// Everything after the first space, if there is one
    pub fn parameter(&self) -> Option<&[u8]> {
        let text = self.text();
        text.iter()
            .position(|&b| b == b' ')
            .map(|space| &text[space + 1..])
    }

    /// Parameter as a 32-bit integer (0 when absent or not numeric)
    pub fn int_parameter(&self) -> i32 {
        let value = self.parameter().map(parse_decimal).unwrap_or(0);
        value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Parameter as a 64-bit integer (0 when absent or not numeric)
    pub fn long_parameter(&self) -> i64 {
        self.parameter().map(parse_decimal).unwrap_or(0)
    }
}

/// Parse a leading decimal integer the way C `atol` does
///
/// Leading whitespace is skipped, one optional sign is accepted, and parsing
/// stops at the first non-digit. Input without digits yields 0. Values beyond
/// the i64 range saturate.
pub fn parse_decimal(bytes: &[u8]) -> i64 {
    let mut rest = bytes;
    while let Some((&b, tail)) = rest.split_first() {
        if !is_c_space(b) {
            break;
        }
        rest = tail;
    }

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for &b in rest {
        if !b.is_ascii_digit() {
            break;
        }
        let digit = (b - b'0') as i64;
        // Accumulate toward the sign so i64::MIN stays reachable
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// Whitespace as defined by C `isspace`
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_match() {
        let line = CommandLine::from_bytes(b"GetLoad");
        assert!(line.matches("GetLoad"));
        assert!(!line.matches("getload"));
        assert!(!line.matches("GetLoa"));
        assert!(!line.matches("GetLoadX"));
    }

    #[test]
    fn test_prefix_match() {
        for text in [&b"SetSpeed"[..], &b"SetSpeed 50"[..], &b"SetSpeed50"[..]] {
            let line = CommandLine::from_bytes(text);
            assert!(line.matches_prefix("SetSpeed"));
        }
        assert!(!CommandLine::from_bytes(b"SetSpee").matches_prefix("SetSpeed"));
    }

    #[test]
    fn test_int_parameter() {
        assert_eq!(CommandLine::from_bytes(b"SetSpeed 50").int_parameter(), 50);
        assert_eq!(CommandLine::from_bytes(b"SetSpeed").int_parameter(), 0);
        assert_eq!(CommandLine::from_bytes(b"SetSpeed50").int_parameter(), 0);
        assert_eq!(CommandLine::from_bytes(b"MoveSteps -200").int_parameter(), -200);
    }

    #[test]
    fn test_parameter_uses_first_space_only() {
        // Extra spaces are skipped by the numeric parser
        assert_eq!(CommandLine::from_bytes(b"SetSpeed   75").int_parameter(), 75);
        // Second token is ignored
        assert_eq!(CommandLine::from_bytes(b"MoveSteps 12 34").long_parameter(), 12);
    }

    #[test]
    fn test_non_numeric_parameter() {
        assert_eq!(CommandLine::from_bytes(b"SetSpeed fast").int_parameter(), 0);
        assert_eq!(CommandLine::from_bytes(b"SetSpeed 42rpm").int_parameter(), 42);
        assert_eq!(CommandLine::from_bytes(b"SetSpeed ").int_parameter(), 0);
    }

    #[test]
    fn test_overflow_saturates() {
        let line = CommandLine::from_bytes(b"MoveSteps 99999999999");
        assert_eq!(line.int_parameter(), i32::MAX);
        assert_eq!(line.long_parameter(), 99_999_999_999);

        let line = CommandLine::from_bytes(b"MoveSteps -99999999999999999999999");
        assert_eq!(line.long_parameter(), i64::MIN);
    }

    #[test]
    fn test_nul_terminates_text() {
        let line = CommandLine::from_bytes(b"GetLoad\0garbage");
        assert!(line.matches("GetLoad"));
        assert_eq!(line.text(), b"GetLoad");
    }

    #[test]
    fn test_capacity() {
        let mut line = CommandLine::new();
        for _ in 0..LINE_CAPACITY {
            line.push(b'x').unwrap();
        }
        assert!(line.is_full());
        assert_eq!(line.push(b'x'), Err(LineError::Full));

        line.clear();
        assert!(line.is_empty());
    }

    proptest! {
        #[test]
        fn prop_int_parameter_reads_back(n in any::<i32>()) {
            let text = std::format!("SetSpeed {}", n);
            let line = CommandLine::from_bytes(text.as_bytes());
            prop_assert_eq!(line.int_parameter(), n);
        }

        #[test]
        fn prop_long_parameter_reads_back(n in any::<i64>()) {
            let text = std::format!("MoveSteps {}", n);
            let line = CommandLine::from_bytes(text.as_bytes());
            prop_assert_eq!(line.long_parameter(), n);
        }

        #[test]
        fn prop_no_space_means_zero(verb in "[A-Za-z0-9]{0,40}") {
            let line = CommandLine::from_bytes(verb.as_bytes());
            prop_assert_eq!(line.int_parameter(), 0);
            prop_assert_eq!(line.long_parameter(), 0);
        }

        #[test]
        fn prop_arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..80)) {
            let line = CommandLine::from_bytes(&bytes);
            let _ = line.int_parameter();
            let _ = line.long_parameter();
            prop_assert!(line.len() <= LINE_CAPACITY);
        }
    }
}
