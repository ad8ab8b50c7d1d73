/*!
limited_cpu - C5: the bounded register/flag simulator consumed by the
discriminator search (C6).

Models a small subset of 6502 state (A, C, D) and a tiny instruction
repertoire, grounded on
`original_source/functional_test/adc_sbc/cbmc/limited_sim_6502.{c,h}`.
Not a general-purpose emulator: see spec.md §1 Non-goals.
*/

use crate::alu;
use crate::variant::CpuVariant;

/// `(A, C, D)` -- the only state the limited simulator tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuState {
    pub a: u8,
    pub c: bool,
    pub d: bool,
}

/// One of the limited simulator's sixteen operation families, decoded
/// from the `[0, 0x707]` integer encoding of spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Lda(u8),
    Adc(u8),
    Sbc(u8),
    Cmp(u8),
    Ora(u8),
    And(u8),
    Eor(u8),
    Cld,
    Sed,
    Clc,
    Sec,
    LsrA,
    AslA,
    RorA,
    RolA,
}

/// Error returned by [`Operation::decode`] for an out-of-range encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOperationEncoding(pub u16);

impl Operation {
    /// Maximum valid encoding, inclusive (spec §3).
    pub const MAX_ENCODING: u16 = 0x707;

    /// Decode an integer `op` in `[0, 0x707]` per spec.md §3's table.
    pub fn decode(op: u16) -> Result<Operation, InvalidOperationEncoding> {
        let band = op >> 8;
        let imm = (op & 0xFF) as u8;
        Ok(match band {
            0x0 => Operation::Lda(imm),
            0x1 => Operation::Adc(imm),
            0x2 => Operation::Sbc(imm),
            0x3 => Operation::Cmp(imm),
            0x4 => Operation::Ora(imm),
            0x5 => Operation::And(imm),
            0x6 => Operation::Eor(imm),
            0x7 => match op {
                0x700 => Operation::Cld,
                0x701 => Operation::Sed,
                0x702 => Operation::Clc,
                0x703 => Operation::Sec,
                0x704 => Operation::LsrA,
                0x705 => Operation::AslA,
                0x706 => Operation::RorA,
                0x707 => Operation::RolA,
                _ => return Err(InvalidOperationEncoding(op)),
            },
            _ => return Err(InvalidOperationEncoding(op)),
        })
    }

    /// Re-encode to the canonical integer (inverse of [`Operation::decode`]).
    pub fn encode(self) -> u16 {
        match self {
            Operation::Lda(v) => 0x000 | v as u16,
            Operation::Adc(v) => 0x100 | v as u16,
            Operation::Sbc(v) => 0x200 | v as u16,
            Operation::Cmp(v) => 0x300 | v as u16,
            Operation::Ora(v) => 0x400 | v as u16,
            Operation::And(v) => 0x500 | v as u16,
            Operation::Eor(v) => 0x600 | v as u16,
            Operation::Cld => 0x700,
            Operation::Sed => 0x701,
            Operation::Clc => 0x702,
            Operation::Sec => 0x703,
            Operation::LsrA => 0x704,
            Operation::AslA => 0x705,
            Operation::RorA => 0x706,
            Operation::RolA => 0x707,
        }
    }
}

/// Interpret `op` against `state`, for the given CPU `variant`.
///
/// - ADC/SBC dispatch to the variant-correct evaluator in [`crate::alu`].
/// - CMP updates only C, by invoking SBC in binary mode (spec §4.3) --
///   the limited simulator never models N/V/Z because its discriminator
///   search only cares about the final accumulator and D flag (I of
///   spec §4.4).
/// - Shift/rotate update C and A per standard 6502 semantics.
/// - CLD/SED/CLC/SEC set D/C explicitly.
pub fn step(variant: CpuVariant, state: CpuState, op: Operation) -> CpuState {
    let mut s = state;
    match op {
        Operation::Lda(v) => s.a = v,
        Operation::Adc(v) => {
            let r = alu::adc(variant, s.d, s.c, s.a, v);
            s.a = r.a;
            s.c = r.c;
        }
        Operation::Sbc(v) => {
            let r = alu::sbc(variant, s.d, s.c, s.a, v);
            s.a = r.a;
            s.c = r.c;
        }
        Operation::Cmp(v) => {
            // CMP never reads/writes D and always behaves like binary SBC
            // for the carry flag, regardless of variant or decimal mode.
            let r = alu::sbc(variant, false, s.c, s.a, v);
            s.c = r.c;
        }
        Operation::Ora(v) => s.a |= v,
        Operation::And(v) => s.a &= v,
        Operation::Eor(v) => s.a ^= v,
        Operation::Cld => s.d = false,
        Operation::Sed => s.d = true,
        Operation::Clc => s.c = false,
        Operation::Sec => s.c = true,
        Operation::LsrA => {
            let carry_out = s.a & 1 != 0;
            s.a >>= 1;
            s.c = carry_out;
        }
        Operation::AslA => {
            let carry_out = s.a & 0x80 != 0;
            s.a <<= 1;
            s.c = carry_out;
        }
        Operation::RorA => {
            let carry_in = s.c;
            let carry_out = s.a & 1 != 0;
            s.a >>= 1;
            if carry_in {
                s.a |= 0x80;
            }
            s.c = carry_out;
        }
        Operation::RolA => {
            let carry_in = s.c;
            let carry_out = s.a & 0x80 != 0;
            s.a <<= 1;
            if carry_in {
                s.a |= 0x01;
            }
            s.c = carry_out;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_encode_round_trip() {
        for op in 0u16..=Operation::MAX_ENCODING {
            let decoded = Operation::decode(op).unwrap();
            assert_eq!(decoded.encode(), op);
        }
    }

    #[test]
    fn decode_rejects_gap_in_0x7xx_band() {
        assert!(Operation::decode(0x708).is_err());
        assert!(Operation::decode(0x800).is_err());
    }

    #[test]
    fn lda_sets_accumulator_only() {
        let s = step(
            CpuVariant::Nmos6502,
            CpuState::default(),
            Operation::Lda(0x42),
        );
        assert_eq!(s.a, 0x42);
        assert!(!s.c);
        assert!(!s.d);
    }

    #[test]
    fn sed_cld_roundtrip() {
        let s = step(CpuVariant::Nmos6502, CpuState::default(), Operation::Sed);
        assert!(s.d);
        let s = step(CpuVariant::Nmos6502, s, Operation::Cld);
        assert!(!s.d);
    }

    #[test]
    fn rol_carries_through_bit7() {
        let s = CpuState {
            a: 0x80,
            c: false,
            d: false,
        };
        let s = step(CpuVariant::Nmos6502, s, Operation::RolA);
        assert_eq!(s.a, 0x00);
        assert!(s.c);
    }

    #[test]
    fn cmp_only_touches_carry() {
        let s = CpuState {
            a: 0x10,
            c: false,
            d: true,
        };
        let s2 = step(CpuVariant::Nmos6502, s, Operation::Cmp(0x05));
        assert_eq!(s2.a, 0x10); // unchanged
        assert!(s2.d); // unchanged
        assert!(s2.c); // A >= operand => carry set
    }

    #[test]
    fn adc_in_decimal_mode_diverges_between_variants() {
        let s = CpuState {
            a: 0x49,
            c: true,
            d: true,
        };
        let v0 = step(CpuVariant::Nmos6502, s, Operation::Adc(0x50));
        let v1 = step(CpuVariant::Nmos6502BinaryOnly, s, Operation::Adc(0x50));
        assert_ne!(v0.a, v1.a);
    }
}
