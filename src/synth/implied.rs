//! Single-byte, two-byte, and three-byte implied addressing families
//! of spec §4.6's template table, grounded on
//! `timing_test_single_byte_instruction_sequence`/
//! `timing_test_two_byte_instruction_sequence`/
//! `timing_test_three_byte_instruction_sequence` in
//! `original_source/timing_test/tic_cmd_cpu_test.c`.

use super::{terminated, Fragment};

/// `OPC` -- a bare implied-addressing opcode (e.g. `CLC`, `INX`, `ASL A`).
pub fn single_byte(opcode: u8) -> Fragment {
    terminated(vec![opcode])
}

/// `OPC1; OPC2` -- a setup opcode priming state for the opcode under
/// test, e.g. `TSX; TXS` to exercise `TXS` without depending on
/// whatever the stack pointer happened to hold beforehand.
pub fn two_byte(setup_opcode: u8, opcode: u8) -> Fragment {
    terminated(vec![setup_opcode, opcode])
}

/// `OPC1; OPC2; OPC3` -- a setup opcode, the tested opcode, and a
/// restoring opcode, e.g. `TSX; PHA; TXS` (test `PHA`, then put the
/// stack pointer back) or `PHP; CLI; PLP` (test `CLI` without
/// permanently altering the interrupt-disable flag).
pub fn three_byte(setup_before: u8, opcode: u8, setup_after: u8) -> Fragment {
    terminated(vec![setup_before, opcode, setup_after])
}
