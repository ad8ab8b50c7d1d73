//! `CpuVariant` - the tagged enum shared by the ALU core (C2) and the
//! limited CPU state machine / discriminator search (C5/C6).
//!
//! Per the re-architecture guidance in spec.md §9: a tagged union with
//! exhaustive `match` dispatch, never virtual dispatch through function
//! pointers, for the ALU core.

/// A 6502-family CPU variant, distinguished by ADC/SBC decimal-mode and
/// (for the limited simulator) nothing else -- the limited CPU model
/// covers no undocumented opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuVariant {
    /// A plain NMOS 6502: decimal-mode ADC/SBC with the full quirky
    /// flag behavior observed on silicon.
    Nmos6502,
    /// An NMOS 6502 variant whose ALU never applies decimal-mode
    /// correction; the `D` flag is accepted but ignored by ADC/SBC.
    Nmos6502BinaryOnly,
    /// A CMOS 65C02: decimal-mode ADC/SBC with corrected N/Z (and an
    /// extra cycle, tracked separately by the timing core).
    Cmos65C02,
}

impl CpuVariant {
    /// All three variants, in the order used by the host hook
    /// `get_cpu_signature` (spec §4.9): 0, 1, 2.
    pub const ALL: [CpuVariant; 3] = [
        CpuVariant::Nmos6502,
        CpuVariant::Nmos6502BinaryOnly,
        CpuVariant::Cmos65C02,
    ];

    /// Decode the `get_cpu_signature() -> {0,1,2,3}` host hook value.
    /// Returns `None` for signature `3` ("unknown").
    pub fn from_signature(sig: u8) -> Option<CpuVariant> {
        match sig {
            0 => Some(CpuVariant::Nmos6502),
            1 => Some(CpuVariant::Nmos6502BinaryOnly),
            2 => Some(CpuVariant::Cmos65C02),
            _ => None,
        }
    }

    /// Encode back to the host hook's signature integer.
    pub fn signature(self) -> u8 {
        match self {
            CpuVariant::Nmos6502 => 0,
            CpuVariant::Nmos6502BinaryOnly => 1,
            CpuVariant::Cmos65C02 => 2,
        }
    }

    /// True for the two NMOS variants (shared undocumented-opcode repertoire).
    pub fn is_nmos(self) -> bool {
        !matches!(self, CpuVariant::Cmos65C02)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_round_trips() {
        for v in CpuVariant::ALL {
            assert_eq!(CpuVariant::from_signature(v.signature()), Some(v));
        }
    }

    #[test]
    fn unknown_signature_is_none() {
        assert_eq!(CpuVariant::from_signature(3), None);
    }
}
