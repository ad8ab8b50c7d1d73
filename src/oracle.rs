/*!
oracle - C9: the abstract cycle-measurement oracle, plus a
self-consistent stub implementation for hosts with no real hardware
attached.

The real oracle is an external collaborator (spec §1, §6): a raw
hardware- or emulator-specific routine that executes a fragment from
its entry address up to, but not including, the fall-through RTS, and
returns the elapsed cycle count. This crate never implements that
routine itself; it only declares the trait real oracles must satisfy
and ships [`SimulatorOracle`] as the "no hardware attached" stand-in
the design notes call for (§9: "stub to `overhead + instruction_cycles`
... used by GCC/simulator targets in practice").
*/

use crate::predict::Prediction;

/// `measure(entry) -> cycles`. Implementations may suspend DMA/
/// interrupts internally; the core treats the call as a single
/// synchronous, blocking operation (§5).
///
/// `predicted` is threaded through so a host-less stub can simply echo
/// it back (the §9 design note); a real hardware/emulator oracle
/// ignores it and performs an actual measurement of `fragment_bytes`
/// starting at `entry`.
pub trait CycleOracle {
    fn measure(&mut self, entry: u16, fragment_bytes: &[u8], predicted: &Prediction) -> i32;
}

/// A deterministic oracle with no real hardware or emulator backing
/// it: it always returns exactly the predicted cycle count, so a
/// timing-driver run against it is trivially self-consistent. Used as
/// the default target for the CLI's `cpu` command when no external
/// oracle is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatorOracle;

impl SimulatorOracle {
    pub fn new() -> SimulatorOracle {
        SimulatorOracle
    }
}

impl CycleOracle for SimulatorOracle {
    fn measure(&mut self, _entry: u16, _fragment_bytes: &[u8], predicted: &Prediction) -> i32 {
        predicted.total_cycles() as i32
    }
}
