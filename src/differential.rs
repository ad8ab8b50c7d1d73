/*!
differential - C4: exhaustive differential comparison between
[`crate::alu`] and a loaded [`crate::reference_table::ReferenceTable`].

Iterates the full 262144-point input cube (`decimal_flag x carry_in x A
x operand`) in the fixed order spec.md §4.2 mandates -- decimal
outermost, then carry_in, then A, then operand -- so that a fixed seed
or a `--stop-on-first-error` run always reports the same first
mismatch (P5).
*/

use crate::alu;
use crate::reference_table::ReferenceTable;
use crate::result::OperationResult;
use crate::variant::CpuVariant;

/// One ADC or SBC operation, distinguishing which table column the
/// mismatch was found against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Adc,
    Sbc,
}

/// A single disagreement between the evaluator under test and the
/// reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub op: Op,
    pub decimal_flag: bool,
    pub carry_in: bool,
    pub a: u8,
    pub operand: u8,
    pub expected: OperationResult,
    pub actual: OperationResult,
}

/// What to do once a mismatch is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Abort and return the first mismatch only.
    StopOnError,
    /// Keep going and collect every mismatch in the cube.
    CollectAll,
}

/// Outcome of a full differential run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DifferentialReport {
    pub points_checked: u64,
    pub mismatches: Vec<Mismatch>,
}

impl DifferentialReport {
    pub fn is_conformant(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Run the differential comparison of `variant` against `table` over
/// the whole input cube, per `mode`.
pub fn run(variant: CpuVariant, table: &ReferenceTable, mode: RunMode) -> DifferentialReport {
    let mut report = DifferentialReport::default();

    tracing::debug!(?variant, ?mode, "starting ALU differential sweep");

    'outer: for dec in [false, true] {
        for c in [false, true] {
            for a in 0u16..256 {
                for operand in 0u16..256 {
                    let a = a as u8;
                    let operand = operand as u8;
                    report.points_checked += 1;

                    let entry = table.get(dec, c, a, operand);

                    let actual_adc = alu::adc(variant, dec, c, a, operand);
                    if actual_adc != entry.adc {
                        tracing::warn!(dec, c, a, operand, "ADC mismatch");
                        report.mismatches.push(Mismatch {
                            op: Op::Adc,
                            decimal_flag: dec,
                            carry_in: c,
                            a,
                            operand,
                            expected: entry.adc,
                            actual: actual_adc,
                        });
                        if mode == RunMode::StopOnError {
                            break 'outer;
                        }
                    }

                    let actual_sbc = alu::sbc(variant, dec, c, a, operand);
                    if actual_sbc != entry.sbc {
                        tracing::warn!(dec, c, a, operand, "SBC mismatch");
                        report.mismatches.push(Mismatch {
                            op: Op::Sbc,
                            decimal_flag: dec,
                            carry_in: c,
                            a,
                            operand,
                            expected: entry.sbc,
                            actual: actual_sbc,
                        });
                        if mode == RunMode::StopOnError {
                            break 'outer;
                        }
                    }
                }
            }
        }
    }

    report
}
