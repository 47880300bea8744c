//! The fixed on-the-wire record: one ASCII line per interrupt.

/// Record width in bytes: `"SSSSSSSS.UUUUUU\n"`. Constant for the lifetime
/// of the device; the ring capacity must be a multiple of this so records
/// only ever straddle the physical wrap point, never the logical end.
pub const RECORD_SIZE: usize = 16;

/// Wall-clock capture taken at interrupt delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub secs: u64,
    pub micros: u32,
}

impl Timestamp {
    pub fn now() -> Self {
        match std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(elapsed) => Timestamp {
                secs: elapsed.as_secs(),
                micros: elapsed.subsec_micros(),
            },
            // Clock before the epoch: clamp rather than fail, there is no
            // error path in the delivery context.
            Err(_) => Timestamp { secs: 0, micros: 0 },
        }
    }
}

/// Format the fixed 16-byte record line: 8 digits of seconds mod 1e8, a
/// dot, 6 digits of microseconds, a newline.
///
/// Saturates rather than fails: seconds wrap mod 1e8 and microseconds
/// clamp to 999999, so the output width is always exactly [`RECORD_SIZE`].
pub fn format_record(ts: Timestamp) -> [u8; RECORD_SIZE] {
    let mut out = [0u8; RECORD_SIZE];

    let mut secs = ts.secs % 100_000_000;
    for slot in out[..8].iter_mut().rev() {
        *slot = b'0' + (secs % 10) as u8;
        secs /= 10;
    }
    out[8] = b'.';

    let mut micros = ts.micros.min(999_999);
    for slot in out[9..15].iter_mut().rev() {
        *slot = b'0' + (micros % 10) as u8;
        micros /= 10;
    }
    out[15] = b'\n';

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(Timestamp { secs: 0, micros: 0 }, b"00000000.000000\n")]
    #[case(Timestamp { secs: 1234, micros: 56 }, b"00001234.000056\n")]
    #[case(Timestamp { secs: 99_999_999, micros: 999_999 }, b"99999999.999999\n")]
    fn test_format(#[case] ts: Timestamp, #[case] expected: &[u8; RECORD_SIZE]) {
        assert_eq!(&format_record(ts), expected);
    }

    #[rstest]
    fn test_seconds_wrap_mod_1e8() {
        let ts = Timestamp {
            secs: 100_000_042,
            micros: 0,
        };
        assert_eq!(&format_record(ts), b"00000042.000000\n");
    }

    #[rstest]
    fn test_spurious_micros_clamped() {
        let ts = Timestamp {
            secs: 1,
            micros: 5_000_000,
        };
        assert_eq!(&format_record(ts), b"00000001.999999\n");
    }

    #[rstest]
    fn test_now_formats_to_fixed_width() {
        let record = format_record(Timestamp::now());
        assert_eq!(record.len(), RECORD_SIZE);
        assert_eq!(record[8], b'.');
        assert_eq!(record[15], b'\n');
        assert!(record[..8].iter().all(u8::is_ascii_digit));
        assert!(record[9..15].iter().all(u8::is_ascii_digit));
    }
}
