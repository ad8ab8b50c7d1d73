/*!
cpu_test_table - a representative opcode-template table for the `cpu`
CLI command.

The original harness enumerates roughly 150 documented opcodes plus a
couple dozen undocumented ones, each wired to a
`timing_test_*_instruction[_sequence]` helper with a literal opcode
byte and cost (`original_source/timing_test/tic_cmd_cpu_test.c`). This
module reproduces that wiring at the granularity of one real 6502
opcode per [`crate::synth::AddressingFamily`] -- enough to exercise
every fragment template and prediction rule in spec §4.6, without
reproducing the full ~150-entry enumeration (out of scope per spec.md
§1: "emulating the full 6502 instruction set").
*/

use crate::synth::AddressingFamily;
use crate::timing_driver::{CaseParams, OpcodeCase};

/// One opcode under test plus the fixed (non-swept) parameters its
/// family needs -- `reg_x`/`reg_y`/`opcode_offset` are left at their
/// default and filled in by the sweep driver.
pub struct CpuTestCase {
    pub case: OpcodeCase,
    pub params: CaseParams,
}

fn case(
    family: AddressingFamily,
    opcode: u8,
    description: &str,
    params: CaseParams,
) -> CpuTestCase {
    CpuTestCase {
        case: OpcodeCase {
            template: crate::synth::OpcodeTemplate::new(family, opcode),
            description: description.to_string(),
        },
        params,
    }
}

fn case_with_template(
    template: crate::synth::OpcodeTemplate,
    description: &str,
    params: CaseParams,
) -> CpuTestCase {
    CpuTestCase {
        case: OpcodeCase {
            template,
            description: description.to_string(),
        },
        params,
    }
}

/// A representative base-address pair used by every indexed-addressing
/// case: `0x1001`, so that `reg_x`/`reg_y = 0xFF` crosses into page
/// `0x11xx` (exercising P8/P9) while `reg_x`/`reg_y = 0x00` stays on
/// the same page.
const ABS_BASE: u16 = 0x1001;
const ZP_ADDRESS: u8 = 0x10;
const PTR_ZP: u8 = 0x20;
const IMM: u8 = 0x05;

/// One representative opcode per addressing-mode family, grounded in
/// real documented 6502 opcode bytes and spec §4.6's template table.
pub fn documented_templates() -> Vec<CpuTestCase> {
    use AddressingFamily::*;
    vec![
        case(SingleByteImplied, 0x18, "CLC", CaseParams::default()), // CLC
        case_with_template(
            crate::synth::OpcodeTemplate::two_byte_implied(0xBA, 0x9A, 2, 2),
            "TSX; TXS",
            CaseParams::default(),
        ),
        case_with_template(
            crate::synth::OpcodeTemplate::three_byte_implied(0xBA, 0x48, 0x9A, 4, 3),
            "TSX; PHA; TXS",
            CaseParams::default(),
        ),
        case(
            ReadImmediate,
            0xA9,
            "LDA #imm",
            CaseParams {
                imm: IMM,
                ..Default::default()
            },
        ),
        case(
            ReadZp,
            0xA5,
            "LDA zp",
            CaseParams {
                zp_address: ZP_ADDRESS,
                ..Default::default()
            },
        ),
        case(
            ReadZpX,
            0xB5,
            "LDA zp,X",
            CaseParams {
                zp_address: ZP_ADDRESS,
                ..Default::default()
            },
        ),
        case(
            ReadZpY,
            0xB6,
            "LDX zp,Y",
            CaseParams {
                zp_address: ZP_ADDRESS,
                ..Default::default()
            },
        ),
        case(
            ReadAbs,
            0xAD,
            "LDA abs",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            ReadAbsX,
            0xBD,
            "LDA abs,X",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            ReadAbsY,
            0xB9,
            "LDA abs,Y",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            ReadZpXIndirect,
            0xA1,
            "LDA (zp,X)",
            CaseParams {
                ptr_zp: PTR_ZP,
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            ReadZpIndirectY,
            0xB1,
            "LDA (zp),Y",
            CaseParams {
                ptr_zp: PTR_ZP,
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            WriteZp,
            0x85,
            "STA zp",
            CaseParams {
                zp_address: ZP_ADDRESS,
                ..Default::default()
            },
        ),
        case(
            WriteZpX,
            0x95,
            "STA zp,X",
            CaseParams {
                zp_address: ZP_ADDRESS,
                ..Default::default()
            },
        ),
        case(
            WriteZpY,
            0x96,
            "STX zp,Y",
            CaseParams {
                zp_address: ZP_ADDRESS,
                ..Default::default()
            },
        ),
        case(
            WriteAbs,
            0x8D,
            "STA abs",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            WriteAbsX,
            0x9D,
            "STA abs,X",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            WriteAbsY,
            0x99,
            "STA abs,Y",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            WriteZpXIndirect,
            0x81,
            "STA (zp,X)",
            CaseParams {
                ptr_zp: PTR_ZP,
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            WriteZpIndirectY,
            0x91,
            "STA (zp),Y",
            CaseParams {
                ptr_zp: PTR_ZP,
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            RmwZp,
            0xE6,
            "INC zp",
            CaseParams {
                zp_address: ZP_ADDRESS,
                ..Default::default()
            },
        ),
        case(
            RmwZpX,
            0xF6,
            "INC zp,X",
            CaseParams {
                zp_address: ZP_ADDRESS,
                ..Default::default()
            },
        ),
        case(
            RmwAbs,
            0xEE,
            "INC abs",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            RmwAbsX,
            0xFE,
            "INC abs,X",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            BranchTaken,
            0xD0, // BNE
            "BNE (taken)",
            CaseParams {
                displacement: 0x10,
                flag_mask: 0x02, // Z
                branch_when_set: false,
                ..Default::default()
            },
        ),
        case(
            BranchNotTaken,
            0xD0, // BNE
            "BNE (not taken)",
            CaseParams {
                displacement: 0x10,
                flag_mask: 0x02,
                branch_when_set: false,
                ..Default::default()
            },
        ),
        case(JmpAbs, 0x4C, "JMP abs", CaseParams::default()),
        case(
            JmpIndirect,
            0x6C,
            "JMP (ind)",
            CaseParams {
                abs_address: ABS_BASE,
                ..Default::default()
            },
        ),
        case(JsrAbs, 0x20, "JSR abs", CaseParams::default()),
        case(
            Rts,
            0x60,
            "RTS",
            CaseParams {
                fake_return: ABS_BASE,
                ..Default::default()
            },
        ),
        case(
            Brk,
            0x00,
            "BRK",
            CaseParams {
                save_sp_zp: 0x30,
                ..Default::default()
            },
        ),
        case(
            Rti,
            0x40,
            "RTI",
            CaseParams {
                fake_return: ABS_BASE,
                fake_status: 0x00,
                ..Default::default()
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every family named in spec §4.6's template table has exactly one
    /// representative opcode here.
    #[test]
    fn covers_every_addressing_family() {
        use AddressingFamily::*;
        let expected = [
            SingleByteImplied,
            TwoByteImplied,
            ThreeByteImplied,
            ReadImmediate,
            ReadZp,
            ReadZpX,
            ReadZpY,
            ReadAbs,
            ReadAbsX,
            ReadAbsY,
            ReadZpXIndirect,
            ReadZpIndirectY,
            WriteZp,
            WriteZpX,
            WriteZpY,
            WriteAbs,
            WriteAbsX,
            WriteAbsY,
            WriteZpXIndirect,
            WriteZpIndirectY,
            RmwZp,
            RmwZpX,
            RmwAbs,
            RmwAbsX,
            BranchTaken,
            BranchNotTaken,
            JmpAbs,
            JmpIndirect,
            JsrAbs,
            Rts,
            Brk,
            Rti,
        ];
        let table = documented_templates();
        assert_eq!(table.len(), expected.len());
        for family in expected {
            assert!(
                table.iter().any(|c| c.case.template.family == family),
                "missing a representative case for {family:?}"
            );
        }
    }
}
