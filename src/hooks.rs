/*!
hooks - C14: host adaptation hooks.

Abstract interface the core consumes for begin/end-of-block,
per-opcode, and per-measurement notifications (spec §4.9), shielding
the core from any specific hardware or simulator. [`HeadlessHooks`] is
the default no-op implementation used in tests and as the simulator
target.
*/

use crate::variant::CpuVariant;

/// Five abstract operations plus the IRQ-vector/zero-page-safety
/// queries spec §4.9 lists.
pub trait HostHooks {
    /// Called once before any measurement runs.
    fn program_start(&mut self) {}

    /// Called once after the last measurement, regardless of outcome.
    fn program_end(&mut self) {}

    /// Called before a batch of measurements that must run with DMA
    /// and interrupts suppressed (e.g. before snapshotting zero-page
    /// bytes). A no-op on a simulator target (spec §5).
    fn pre_big_measurement_block(&mut self) {}

    /// Called after such a batch completes.
    fn post_big_measurement_block(&mut self) {}

    /// Called before testing one opcode. `skip` is true when the
    /// driver has already decided to skip this opcode (e.g. a JAM
    /// opcode, or `include_buggy_illegals` is off).
    fn pre_opcode_test(&mut self, _description: &str, _skip: bool) {}

    /// Called after every single measurement. Returning `false`
    /// requests a graceful abort (spec §7's `UserAbort`); the driver
    /// honors this at the next measurement boundary.
    fn post_every_measurement(
        &mut self,
        _success: bool,
        _opcode_index: u8,
        _test_count: u64,
        _error_count: u64,
    ) -> bool {
        true
    }

    /// Whether zero-page address `addr` may be safely read for
    /// snapshotting purposes.
    fn zp_is_safe_for_read(&self, addr: u8) -> bool {
        let _ = addr;
        true
    }

    /// Whether zero-page address `addr` may be safely written (and
    /// later restored) by a synthesized fragment.
    fn zp_is_safe_for_write(&self, addr: u8) -> bool {
        let _ = addr;
        true
    }

    /// Install a new IRQ vector for a BRK test, returning the previous
    /// one so the driver can restore it immediately afterward.
    fn set_irq_vector(&mut self, new_vector: u16) -> u16 {
        new_vector
    }

    /// `overhead` cycles BRK's IRQ dispatch takes on this host/platform
    /// (spec §4.6's `IRQ_PLATFORM_OVERHEAD`; e.g. 7 on one real host, 28
    /// on another, 0 on a bare simulator).
    fn irq_platform_overhead(&self) -> u32 {
        0
    }

    /// The attached CPU's variant signature, or `None` if unknown
    /// (spec §4.9: `3: unknown`).
    fn get_cpu_signature(&self) -> Option<CpuVariant> {
        None
    }
}

/// The default, side-effect-free implementation: every zero-page
/// address is safe, every measurement continues, and there is no real
/// IRQ hardware to account for. Used in tests and as the headless
/// simulator target when no real host is attached.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHooks {
    irq_vector: u16,
    variant: Option<CpuVariant>,
}

impl HeadlessHooks {
    pub fn new() -> HeadlessHooks {
        HeadlessHooks::default()
    }

    pub fn with_variant(variant: CpuVariant) -> HeadlessHooks {
        HeadlessHooks {
            irq_vector: 0,
            variant: Some(variant),
        }
    }
}

impl HostHooks for HeadlessHooks {
    fn set_irq_vector(&mut self, new_vector: u16) -> u16 {
        let old = self.irq_vector;
        self.irq_vector = new_vector;
        old
    }

    fn get_cpu_signature(&self) -> Option<CpuVariant> {
        self.variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_hooks_default_to_permissive() {
        let hooks = HeadlessHooks::new();
        assert!(hooks.zp_is_safe_for_read(0x10));
        assert!(hooks.zp_is_safe_for_write(0x10));
        assert_eq!(hooks.irq_platform_overhead(), 0);
        assert_eq!(hooks.get_cpu_signature(), None);
    }

    #[test]
    fn set_irq_vector_returns_previous_value() {
        let mut hooks = HeadlessHooks::new();
        let old = hooks.set_irq_vector(0x1234);
        assert_eq!(old, 0);
        let old2 = hooks.set_irq_vector(0x5678);
        assert_eq!(old2, 0x1234);
    }

    #[test]
    fn with_variant_reports_signature() {
        let hooks = HeadlessHooks::with_variant(CpuVariant::Cmos65C02);
        assert_eq!(hooks.get_cpu_signature(), Some(CpuVariant::Cmos65C02));
    }
}
