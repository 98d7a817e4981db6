//! Monotonic time source

/// Monotonic clock since boot
pub trait Clock {
    /// Microseconds since boot
    fn now_us(&self) -> u64;

    /// Milliseconds since boot, wrapping like a 32-bit tick counter
    ///
    /// Consumers compare these with `wrapping_sub`, never with `<`.
    fn now_ms(&self) -> u32 {
        (self.now_us() / 1000) as u32
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u64);

    impl Clock for Fixed {
        fn now_us(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_now_ms_truncates() {
        assert_eq!(Fixed(1_999).now_ms(), 1);
        assert_eq!(Fixed(2_000).now_ms(), 2);
    }

    #[test]
    fn test_now_ms_wraps() {
        let us = (u32::MAX as u64 + 5) * 1000;
        assert_eq!(Fixed(us).now_ms(), 4);
    }
}
