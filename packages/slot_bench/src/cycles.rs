//! Cycle counter reads bracketing the timed region.

/// Reads a monotonic high-resolution cycle counter.
///
/// On x86_64 this is the TSC; on aarch64 the virtual counter register. Other
/// architectures fall back to a monotonic nanosecond clock, which keeps the
/// elapsed figure meaningful even if it is no longer literally in CPU cycles.
///
/// Only strictly-increasing before/after reads around the timed region are
/// required; no frequency calibration is performed.
#[must_use]
#[inline]
#[cfg_attr(test, mutants::skip)] // Cannot usefully assert on real hardware counter values.
pub fn read_cycle_counter() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        // SAFETY: RDTSC is unprivileged and has no memory or register
        // preconditions.
        unsafe { core::arch::x86_64::_rdtsc() }
    }

    #[cfg(target_arch = "aarch64")]
    {
        let count: u64;

        // SAFETY: CNTVCT_EL0 is readable from user mode; the instruction only
        // writes the named output register.
        unsafe {
            core::arch::asm!("mrs {}, cntvct_el0", out(reg) count, options(nomem, nostack));
        }

        count
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        fallback_nanos()
    }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn fallback_nanos() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();

    let epoch = *EPOCH.get_or_init(Instant::now);

    u64::try_from(epoch.elapsed().as_nanos())
        .expect("a run long enough to overflow u64 nanoseconds would never complete anyway")
}

/// Scales an elapsed cycle range to the "million cycles" figure used in reports.
///
/// A counter that went backwards (impossible for reads taken on one thread)
/// clamps to zero rather than producing nonsense.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "cycle counts near 2^52 lose sub-cycle precision only, irrelevant for reporting"
)]
pub fn megacycles(start: u64, end: u64) -> f64 {
    end.saturating_sub(start) as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_does_not_go_backwards() {
        let first = read_cycle_counter();
        let second = read_cycle_counter();

        assert!(second >= first);
    }

    #[test]
    fn megacycles_scales_by_a_million() {
        assert!((megacycles(0, 2_500_000) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn megacycles_clamps_inverted_ranges() {
        assert!((megacycles(100, 50)).abs() < f64::EPSILON);
    }
}
