/*!
report - C13: test/error counters and structured mismatch reports.

Spec §2 explicitly leaves formatting unspecified; this module only
shapes the data, deferring presentation to callers (`main.rs`'s `cpu`
and `msm` commands, or the optional `json` feature's `serde`
derives).
*/

#[cfg(feature = "json")]
use serde::Serialize;

use crate::result::OperationResult;

/// Monotonic `test_count`/`error_count`, threaded explicitly through
/// the driver rather than kept as globals (spec §9's re-architecture
/// guidance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Counters {
    pub test_count: u64,
    pub error_count: u64,
}

impl Counters {
    pub fn record(&mut self, success: bool) {
        self.test_count += 1;
        if !success {
            self.error_count += 1;
        }
    }

    pub fn all_passed(&self) -> bool {
        self.error_count == 0
    }
}

/// `(decimal_flag, carry_in, A, operand, field_name, expected, got)` --
/// one ALU-core mismatch record (spec §7).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct AluMismatch {
    pub decimal_flag: bool,
    pub carry_in: bool,
    pub a: u8,
    pub operand: u8,
    pub field_name: &'static str,
    pub expected: String,
    pub got: String,
}

impl AluMismatch {
    /// Diff two [`OperationResult`]s field-by-field, returning one
    /// `AluMismatch` per field that differs.
    pub fn diff(
        decimal_flag: bool,
        carry_in: bool,
        a: u8,
        operand: u8,
        expected: OperationResult,
        got: OperationResult,
    ) -> Vec<AluMismatch> {
        let mut mismatches = Vec::new();
        macro_rules! check {
            ($field:ident, $name:literal) => {
                if expected.$field != got.$field {
                    mismatches.push(AluMismatch {
                        decimal_flag,
                        carry_in,
                        a,
                        operand,
                        field_name: $name,
                        expected: format!("{:?}", expected.$field),
                        got: format!("{:?}", got.$field),
                    });
                }
            };
        }
        check!(a, "A");
        check!(n, "N");
        check!(v, "V");
        check!(z, "Z");
        check!(c, "C");
        mismatches
    }
}

/// `(description, opcode_offset, operand, reg_x, reg_y, address_offset,
/// zp_address, predicted_cycles, actual_cycles)` -- one timing-core
/// mismatch record (spec §7).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct TimingMismatch {
    pub description: String,
    pub opcode_offset: u8,
    pub operand: u8,
    pub reg_x: u8,
    pub reg_y: u8,
    pub address_offset: u16,
    pub zp_address: u8,
    pub predicted_cycles: u32,
    pub actual_cycles: i32,
}

/// The outcome of a full driver run: final counters plus every
/// mismatch collected (if `RunMode::CollectAll`) or the single one that
/// stopped the run (if `RunMode::StopOnError`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct RunSummary {
    pub counters: Counters,
    pub timing_mismatches: Vec<TimingMismatch>,
    pub aborted_by_user: bool,
}
