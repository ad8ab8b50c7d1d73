#![doc = r#"
mos65xx-conformance library crate.

A hardware-conformance test harness for 6502-family microprocessors:
bit-exact ADC/SBC reference models across binary and decimal (BCD)
mode (the ALU core), and an instruction-timing driver that synthesizes
minimal code fragments, measures their cycle count through an abstract
oracle, and compares against a predicted cost (the timing core).

Modules:
- result: C1, the packed `(A, N, V, Z, C)` operation result and its
  canonical two-byte on-disk encoding.
- alu: C2, the four pure ADC/SBC reference evaluators.
- reference_table: C3, ground-truth table I/O (524288-byte files).
- differential: C4, the ALU differential tester.
- limited_cpu: C5, the bounded register/flag simulator.
- discriminator: C6, bounded nondeterministic search for CPU-variant
  discriminator sequences.
- arena: C7, the page-aligned test-code memory arena.
- synth: C8, opcode templates and fragment emission.
- oracle: C9, the abstract cycle-measurement oracle.
- predict: C10, the cycle-prediction engine.
- timing_driver: C11, the timing test driver.
- zeropage: C12, zero-page preservation around a measurement.
- report: C13, counters and structured mismatch reports.
- hooks: C14, host adaptation hooks.
- variant: the `CpuVariant` tagged enum shared by the ALU core and the
  limited CPU state machine.
- config: process/CLI configuration, plus the coverage-level to
  `STEP_SIZE` mapping.
- cpu_test_table: a representative opcode-template table wiring one
  real opcode per addressing family into the `cpu` CLI command.
- error: crate-wide error taxonomy.
"#]

pub mod alu;
pub mod arena;
pub mod config;
pub mod cpu_test_table;
pub mod differential;
pub mod discriminator;
pub mod error;
pub mod hooks;
pub mod limited_cpu;
pub mod oracle;
pub mod predict;
pub mod reference_table;
pub mod report;
pub mod result;
pub mod synth;
pub mod timing_driver;
pub mod variant;
pub mod zeropage;

// Re-export commonly used types at the crate root, the way the
// teacher's facade re-exports `Bus`/`Cartridge`/`Cpu6502`.
pub use error::{ConformanceError, Result};
pub use reference_table::ReferenceTable;
pub use result::OperationResult;
pub use variant::CpuVariant;
