/*!
predict - C10: the prediction engine.

For each addressing-mode family, computes expected total cycles =
overhead + instruction + page-crossing extra (spec §4.6, P7/P8/P9).
*/

use crate::synth::{different_pages, AddressingFamily, OpcodeTemplate};

/// A fully-resolved cycle prediction for one parameter combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Prediction {
    pub overhead_cycles: u32,
    pub instruction_cycles: u32,
    pub page_crossing_cycles: u32,
}

impl Prediction {
    pub fn total_cycles(&self) -> u32 {
        self.overhead_cycles + self.instruction_cycles + self.page_crossing_cycles
    }
}

/// Addresses relevant to page-crossing detection for the families that
/// need it. Families that never cross pages (writes, zp, immediate,
/// implied, RMW) simply ignore this.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressPair {
    pub base: u16,
    pub effective: u16,
}

/// Predict total cycles for `template` given the effective/base address
/// pair used for page-crossing detection (ignored for families where
/// `template.page_crossing_adds_one` is false), plus an optional extra
/// predicate for branch-target page crossing (P7).
pub fn predict(
    template: &OpcodeTemplate,
    addresses: AddressPair,
    branch_taken_crosses_to_different_page: bool,
) -> Prediction {
    let crosses = match template.family {
        AddressingFamily::ReadAbsX
        | AddressingFamily::ReadAbsY
        | AddressingFamily::ReadZpIndirectY => different_pages(addresses.base, addresses.effective),
        AddressingFamily::BranchTaken => branch_taken_crosses_to_different_page,
        _ => false,
    };

    Prediction {
        overhead_cycles: template.overhead_cycles,
        instruction_cycles: template.instruction_cycles_base,
        page_crossing_cycles: if crosses && template.page_crossing_adds_one {
            1
        } else {
            0
        },
    }
}

/// Predict BRK cycles, which need the host-supplied IRQ overhead
/// constant rather than a static template value (spec §4.6).
pub fn predict_brk(irq_platform_overhead: u32, instruction_cycles_base: u32) -> Prediction {
    Prediction {
        overhead_cycles: OpcodeTemplate::brk_overhead(irq_platform_overhead),
        instruction_cycles: instruction_cycles_base,
        page_crossing_cycles: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::AddressingFamily;

    /// Scenario 5: `LDA abs,X` at `base`, `reg_x=0` => `2 + 4 = 6`;
    /// `reg_x=0xFF` with `base & 0xFF == 0x01` => `2 + 4 + 1 = 7`.
    #[test]
    fn scenario_five_lda_abs_x() {
        let template = OpcodeTemplate::new(AddressingFamily::ReadAbsX, 0xBD);
        let no_cross = predict(
            &template,
            AddressPair {
                base: 0x0201,
                effective: 0x0201,
            },
            false,
        );
        assert_eq!(no_cross.total_cycles(), 6);

        let crossing = predict(
            &template,
            AddressPair {
                base: 0x0201,
                effective: 0x0300,
            },
            false,
        );
        assert_eq!(crossing.total_cycles(), 7);
    }

    /// P8: `read abs,X`/`read abs,Y` cycles = `4 + different_pages(base, base+index)`.
    #[test]
    fn p8_read_abs_indexed_crossing() {
        let template = OpcodeTemplate::new(AddressingFamily::ReadAbsY, 0xB9);
        let p = predict(
            &template,
            AddressPair {
                base: 0x10FF,
                effective: 0x1100,
            },
            false,
        );
        assert_eq!(p.instruction_cycles + p.page_crossing_cycles, 5);
    }

    /// P9: `(zp),Y` reads cost `5 + different_pages(base, base+Y)`.
    #[test]
    fn p9_indirect_indexed_crossing() {
        let template = OpcodeTemplate::new(AddressingFamily::ReadZpIndirectY, 0xB1);
        let p = predict(
            &template,
            AddressPair {
                base: 0x20FF,
                effective: 0x2105,
            },
            false,
        );
        assert_eq!(p.instruction_cycles + p.page_crossing_cycles, 6);
    }

    /// P7: branch-taken cost is `3 + different_pages(...)`.
    #[test]
    fn p7_branch_taken_crossing() {
        let template = OpcodeTemplate::new(AddressingFamily::BranchTaken, 0xD0);
        let p = predict(&template, AddressPair::default(), true);
        assert_eq!(p.instruction_cycles + p.page_crossing_cycles, 4);
        let p_same_page = predict(&template, AddressPair::default(), false);
        assert_eq!(p_same_page.instruction_cycles + p_same_page.page_crossing_cycles, 3);
    }

    /// Write families never charge a page-crossing cycle even when
    /// indexed across a boundary.
    #[test]
    fn write_abs_x_ignores_crossing() {
        let template = OpcodeTemplate::new(AddressingFamily::WriteAbsX, 0x9D);
        let p = predict(
            &template,
            AddressPair {
                base: 0x20FF,
                effective: 0x2105,
            },
            false,
        );
        assert_eq!(p.page_crossing_cycles, 0);
    }

    #[test]
    fn brk_overhead_uses_host_constant() {
        let p = predict_brk(7, 7);
        assert_eq!(p.total_cycles(), 2 + 4 + 7 + 4 + 2 + 7);
    }
}
