/*!
alu - C2: pure ADC/SBC reference evaluators.

Four pure functions, each `(decimal_flag, carry_in, A, operand) ->
OperationResult`, dispatching to a shared binary-mode implementation
or a variant-specific decimal-mode implementation. Grounded on
`original_source/functional_test/adc_sbc/analysis/adc_sbc_reference_implementations.c`,
which is the hardware-validated reference this module reproduces.

No errors: these are pure computations over totally-defined inputs
(I1). A discrepancy against a captured ground-truth table is reported
by [`crate::differential`], not here.
*/

mod binary;
mod cmos;
mod nmos;

pub use binary::{adc_binary, sbc_binary};
pub use cmos::{adc_cmos, sbc_cmos};
pub use nmos::{adc_nmos, sbc_nmos};

use crate::result::OperationResult;
use crate::variant::CpuVariant;

/// Evaluate ADC for the given variant. `Nmos6502BinaryOnly` ignores
/// `decimal_flag` entirely (I5: binary-mode results are identical to
/// plain NMOS; decimal mode is simply never entered).
pub fn adc(variant: CpuVariant, decimal_flag: bool, carry_in: bool, a: u8, operand: u8) -> OperationResult {
    match variant {
        CpuVariant::Nmos6502 => adc_nmos(decimal_flag, carry_in, a, operand),
        CpuVariant::Nmos6502BinaryOnly => adc_nmos(false, carry_in, a, operand),
        CpuVariant::Cmos65C02 => adc_cmos(decimal_flag, carry_in, a, operand),
    }
}

/// Evaluate SBC for the given variant. See [`adc`] for the binary-only
/// variant's treatment of `decimal_flag`.
pub fn sbc(variant: CpuVariant, decimal_flag: bool, carry_in: bool, a: u8, operand: u8) -> OperationResult {
    match variant {
        CpuVariant::Nmos6502 => sbc_nmos(decimal_flag, carry_in, a, operand),
        CpuVariant::Nmos6502BinaryOnly => sbc_nmos(false, carry_in, a, operand),
        CpuVariant::Cmos65C02 => sbc_cmos(decimal_flag, carry_in, a, operand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// P1 / I5: for all binary-mode inputs, V0 and V1 are identical;
    /// they may differ only when D = 1.
    #[test]
    fn v0_v1_agree_in_binary_mode() {
        for carry_in in [false, true] {
            for a in 0u8..=255 {
                let operands = [0u8, 1, 0x7f, 0x80, 0xff, a.wrapping_mul(37).wrapping_add(11)];
                for operand in operands {
                    let r0 = adc(CpuVariant::Nmos6502, false, carry_in, a, operand);
                    let r1 = adc(CpuVariant::Nmos6502BinaryOnly, false, carry_in, a, operand);
                    assert_eq!(r0, r1);
                    let r0 = sbc(CpuVariant::Nmos6502, false, carry_in, a, operand);
                    let r1 = sbc(CpuVariant::Nmos6502BinaryOnly, false, carry_in, a, operand);
                    assert_eq!(r0, r1);
                }
            }
        }
    }
}
