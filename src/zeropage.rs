/*!
zeropage - C12: save/restore of host zero-page bytes a synthesized
fragment is about to clobber.

Before each measurement the harness snapshots every address a
fragment declares in `Fragment::zp_writes`, runs the measurement, then
restores them (I4, P6) -- but only for addresses the host predicate
(`crate::hooks::HostHooks::zp_is_safe_for_write`) allows; unsafe
addresses make the whole parameter combination get skipped upstream
in `timing_driver`, not snapshotted here.
*/

use crate::hooks::HostHooks;

/// A zero-page byte's value at the moment it was snapshotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Saved {
    address: u8,
    value: u8,
}

/// An in-flight save/restore session for one measurement.
#[derive(Debug, PartialEq, Eq)]
pub struct ZeroPageGuard {
    saved: Vec<Saved>,
}

/// Outcome of attempting to open a guard for a set of addresses.
#[derive(Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Every address was safe to preserve; the guard is ready.
    Ready(ZeroPageGuard),
    /// At least one address failed the host's safety predicate; the
    /// whole combination must be skipped (not an error -- spec §7's
    /// `UnsafeZeroPage` is explicitly not an error kind).
    Skip { unsafe_address: u8 },
}

impl ZeroPageGuard {
    /// Snapshot every address in `addresses` by reading it through
    /// `read`, after checking `hooks.zp_is_safe_for_write`. `read`
    /// models the host's zero-page peek (direct memory read on
    /// hardware, array index on a simulator).
    pub fn open(
        hooks: &dyn HostHooks,
        addresses: &[u8],
        mut read: impl FnMut(u8) -> u8,
    ) -> GuardOutcome {
        let mut saved = Vec::with_capacity(addresses.len());
        for &address in addresses {
            if !hooks.zp_is_safe_for_write(address) {
                return GuardOutcome::Skip {
                    unsafe_address: address,
                };
            }
            saved.push(Saved {
                address,
                value: read(address),
            });
        }
        GuardOutcome::Ready(ZeroPageGuard { saved })
    }

    /// Restore every snapshotted byte via `write`. Consumes the guard:
    /// a restored guard has nothing left to protect.
    pub fn restore(self, mut write: impl FnMut(u8, u8)) {
        for entry in self.saved {
            write(entry.address, entry.value);
        }
    }

    /// Addresses this guard is protecting, in snapshot order.
    pub fn addresses(&self) -> impl Iterator<Item = u8> + '_ {
        self.saved.iter().map(|s| s.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HeadlessHooks;
    use std::cell::RefCell;

    #[test]
    fn round_trips_through_save_and_restore() {
        let hooks = HeadlessHooks::default();
        let memory = RefCell::new([0u8; 256]);
        memory.borrow_mut()[0x80] = 0x42;
        memory.borrow_mut()[0x81] = 0x99;

        let outcome = ZeroPageGuard::open(&hooks, &[0x80, 0x81], |a| memory.borrow()[a as usize]);
        let guard = match outcome {
            GuardOutcome::Ready(g) => g,
            GuardOutcome::Skip { .. } => panic!("expected Ready"),
        };

        // Simulate the fragment clobbering both bytes.
        memory.borrow_mut()[0x80] = 0xFF;
        memory.borrow_mut()[0x81] = 0xFF;

        guard.restore(|a, v| memory.borrow_mut()[a as usize] = v);

        assert_eq!(memory.borrow()[0x80], 0x42);
        assert_eq!(memory.borrow()[0x81], 0x99);
    }

    struct AlwaysUnsafe;
    impl HostHooks for AlwaysUnsafe {
        fn zp_is_safe_for_read(&self, _addr: u8) -> bool {
            false
        }
        fn zp_is_safe_for_write(&self, _addr: u8) -> bool {
            false
        }
    }

    #[test]
    fn unsafe_address_yields_skip() {
        let outcome = ZeroPageGuard::open(&AlwaysUnsafe, &[0x02], |_| 0);
        assert_eq!(
            outcome,
            GuardOutcome::Skip {
                unsafe_address: 0x02
            }
        );
    }
}
