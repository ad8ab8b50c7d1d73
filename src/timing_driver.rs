/*!
timing_driver - C11: the timing test driver.

For each opcode template, iterates the enabled parameters at the
selected `STEP_SIZE`: synthesize a fragment (C8), preserve clobbered
zero-page bytes (C12), invoke the cycle oracle (C9), compare against
the prediction (C10), update counters, emit a structured report on
mismatch, and consult the host hooks (C14) to decide whether to
continue. A single opcode test reports success only if every parameter
combination matches (spec §4.7).
*/

use crate::arena::Arena;
use crate::config::step_values;
use crate::hooks::HostHooks;
use crate::oracle::CycleOracle;
use crate::predict::{predict, AddressPair, Prediction};
use crate::report::{Counters, TimingMismatch};
use crate::synth::{branches, control_flow, implied, load_store, rmw, AddressingFamily, OpcodeTemplate};
use crate::zeropage::{GuardOutcome, ZeroPageGuard};

/// What to do once a mismatch is found (grounded in
/// `original_source/timing_test/timing_test_routines.c`'s
/// `DEFAULT_RUN_FLAGS (F_STOP_ON_ERROR)`; spec §7 only names the
/// behavior, not the mechanism).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    StopOnError,
    CollectAll,
}

/// Parameters for one synthesized fragment. Only the fields relevant
/// to a given [`AddressingFamily`] are consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseParams {
    /// Offset from the arena's anchor at which the fragment is placed
    /// (spec §4.6's `opcode_page_offset in [0..255]`), exercising
    /// page-crossing scenarios at the opcode's own placement rather
    /// than in its operand addressing.
    pub opcode_offset: u8,
    pub imm: u8,
    pub zp_address: u8,
    pub abs_address: u16,
    pub reg_x: u8,
    pub reg_y: u8,
    pub ptr_zp: u8,
    pub displacement: i8,
    pub flag_mask: u8,
    pub branch_when_set: bool,
    pub fake_return: u16,
    pub fake_status: u8,
    pub save_sp_zp: u8,
}

/// One opcode under test: its template plus a human-readable
/// description for reports and hooks.
#[derive(Debug, Clone)]
pub struct OpcodeCase {
    pub template: OpcodeTemplate,
    pub description: String,
}

/// Dispatch to the right [`crate::synth`] submodule for `template`'s
/// family, given the fragment's intended load address `entry_base`.
fn synthesize(template: &OpcodeTemplate, entry_base: u16, p: &CaseParams) -> crate::synth::Fragment {
    use AddressingFamily::*;
    let op = template.opcode;
    match template.family {
        SingleByteImplied => implied::single_byte(op),
        TwoByteImplied => implied::two_byte(
            template.setup_before.expect("two-byte implied template always carries setup_before"),
            op,
        ),
        ThreeByteImplied => implied::three_byte(
            template.setup_before.expect("three-byte implied template always carries setup_before"),
            op,
            template.setup_after.expect("three-byte implied template always carries setup_after"),
        ),
        ReadImmediate => load_store::read_immediate(op, p.imm),
        ReadZp | WriteZp => load_store::zp(op, p.zp_address),
        RmwZp => rmw::zp(op, p.zp_address),
        ReadZpX | WriteZpX => load_store::zp_x(op, p.reg_x, p.zp_address),
        RmwZpX => rmw::zp_x(op, p.reg_x, p.zp_address),
        ReadZpY | WriteZpY => load_store::zp_y(op, p.reg_y, p.zp_address),
        ReadAbs | WriteAbs => load_store::abs(op, p.abs_address),
        RmwAbs => rmw::abs(op, p.abs_address),
        ReadAbsX | WriteAbsX => load_store::abs_x(op, p.reg_x, p.abs_address),
        RmwAbsX => rmw::abs_x(op, p.reg_x, p.abs_address),
        ReadAbsY | WriteAbsY => load_store::abs_y(op, p.reg_y, p.abs_address),
        ReadZpXIndirect | WriteZpXIndirect => {
            load_store::zp_x_indirect(op, p.ptr_zp, p.abs_address, p.reg_x)
        }
        ReadZpIndirectY | WriteZpIndirectY => {
            load_store::zp_indirect_y(op, p.ptr_zp, p.abs_address, p.reg_y)
        }
        BranchTaken => branches::taken(entry_base, op, p.displacement, p.flag_mask, p.branch_when_set),
        BranchNotTaken => {
            branches::not_taken(entry_base, op, p.displacement, p.flag_mask, p.branch_when_set)
        }
        JmpAbs => control_flow::jmp_abs(entry_base),
        JmpIndirect => control_flow::jmp_indirect(p.abs_address),
        JsrAbs => control_flow::jsr_abs(entry_base),
        Rts => control_flow::rts(p.fake_return),
        Brk => control_flow::brk(p.save_sp_zp),
        Rti => control_flow::rti(p.fake_return, p.fake_status),
    }
}

/// Address pair used for page-crossing prediction, derived the same
/// way [`synthesize`] derives its fragment bytes.
fn address_pair(template: &OpcodeTemplate, p: &CaseParams) -> AddressPair {
    use AddressingFamily::*;
    match template.family {
        ReadAbsX | WriteAbsX | RmwAbsX => AddressPair {
            base: p.abs_address,
            effective: p.abs_address.wrapping_add(p.reg_x as u16),
        },
        ReadAbsY | WriteAbsY => AddressPair {
            base: p.abs_address,
            effective: p.abs_address.wrapping_add(p.reg_y as u16),
        },
        ReadZpIndirectY | WriteZpIndirectY => AddressPair {
            base: p.abs_address,
            effective: p.abs_address.wrapping_add(p.reg_y as u16),
        },
        _ => AddressPair::default(),
    }
}

/// Run one opcode case across every `reg_x`/`reg_y` (or plain operand)
/// value at `step_size`, reusing a single fixed `zp_address`/
/// `abs_address` pair for every iteration. Most of spec §4.6's
/// indexed-addressing families are exercised this way: the sweep
/// parameter is whichever index register the family actually uses.
pub fn run_indexed_family<O: CycleOracle>(
    case: &OpcodeCase,
    arena: &mut Arena,
    oracle: &mut O,
    hooks: &mut dyn HostHooks,
    base_params: CaseParams,
    step_size: u32,
    counters: &mut Counters,
    mode: RunMode,
) -> Vec<TimingMismatch> {
    let mut mismatches = Vec::new();
    let index_values = step_values(step_size);

    tracing::debug!(
        opcode = case.template.opcode,
        description = %case.description,
        points = index_values.len(),
        "sweeping addressing-mode parameter"
    );

    for &index in &index_values {
        let mut params = base_params;
        match case.template.family {
            AddressingFamily::ReadAbsY
            | AddressingFamily::WriteAbsY
            | AddressingFamily::ReadZpY
            | AddressingFamily::WriteZpY
            | AddressingFamily::ReadZpIndirectY
            | AddressingFamily::WriteZpIndirectY => params.reg_y = index,
            _ => params.reg_x = index,
        }

        let (success, mismatch) = run_one(case, arena, oracle, hooks, params);
        counters.record(success);
        if let Some(m) = mismatch {
            tracing::warn!(
                opcode = case.template.opcode,
                predicted = m.predicted_cycles,
                actual = m.actual_cycles,
                "timing mismatch"
            );
            mismatches.push(m);
        }
        let keep_going = hooks.post_every_measurement(
            success,
            case.template.opcode,
            counters.test_count,
            counters.error_count,
        );
        if !keep_going || (!success && mode == RunMode::StopOnError) {
            break;
        }
    }
    mismatches
}

/// Run one opcode case with a single, fixed parameter combination --
/// for families with no addressing-mode parameter to sweep
/// (`SingleByteImplied`, `TwoByteImplied`, `ThreeByteImplied`, and the
/// control-flow family), grounded on
/// `timing_test_single_byte_instruction_sequence` and its two/three
/// byte siblings in `original_source/timing_test/tic_cmd_cpu_test.c`,
/// which each call the measurement exactly once per opcode.
pub fn run_fixed<O: CycleOracle>(
    case: &OpcodeCase,
    arena: &mut Arena,
    oracle: &mut O,
    hooks: &mut dyn HostHooks,
    params: CaseParams,
    counters: &mut Counters,
) -> Vec<TimingMismatch> {
    let (success, mismatch) = run_one(case, arena, oracle, hooks, params);
    counters.record(success);
    if let Some(ref m) = mismatch {
        tracing::warn!(
            opcode = case.template.opcode,
            predicted = m.predicted_cycles,
            actual = m.actual_cycles,
            "timing mismatch"
        );
    }
    hooks.post_every_measurement(
        success,
        case.template.opcode,
        counters.test_count,
        counters.error_count,
    );
    mismatch.into_iter().collect()
}

/// Dispatch `case` to [`run_fixed`] or [`run_indexed_family`] depending
/// on whether its family has an addressing-mode parameter to sweep
/// (spec §4.7: "for each combination of the enabled parameters").
pub fn run_case<O: CycleOracle>(
    case: &OpcodeCase,
    arena: &mut Arena,
    oracle: &mut O,
    hooks: &mut dyn HostHooks,
    base_params: CaseParams,
    step_size: u32,
    counters: &mut Counters,
    mode: RunMode,
) -> Vec<TimingMismatch> {
    use AddressingFamily::*;
    match case.template.family {
        SingleByteImplied | TwoByteImplied | ThreeByteImplied | JmpAbs | JmpIndirect | JsrAbs
        | Rts | Brk | Rti => run_fixed(case, arena, oracle, hooks, base_params, counters),
        BranchTaken | BranchNotTaken => {
            // Branches sweep the displacement, not an index register;
            // callers that need every displacement call run_fixed once
            // per displacement value themselves (spec's branch
            // displacement edge case at -1/-2 is a per-value skip, not
            // a uniform sweep like the indexed families below).
            run_fixed(case, arena, oracle, hooks, base_params, counters)
        }
        _ => run_indexed_family(case, arena, oracle, hooks, base_params, step_size, counters, mode),
    }
}

/// Run a single parameter combination: synthesize, guard zero-page
/// writes, measure, predict, compare.
fn run_one<O: CycleOracle>(
    case: &OpcodeCase,
    arena: &mut Arena,
    oracle: &mut O,
    hooks: &mut dyn HostHooks,
    params: CaseParams,
) -> (bool, Option<TimingMismatch>) {
    let anchor_rel = arena.anchor() - arena.base();
    let entry_addr = (anchor_rel + params.opcode_offset as usize) as u16; // arena-relative address, treated as the absolute entry for this fragment
    let fragment = synthesize(&case.template, entry_addr, &params);

    let guard = ZeroPageGuard::open(hooks, &fragment.zp_writes, |addr| {
        arena.as_slice()[addr as usize]
    });
    let guard = match guard {
        GuardOutcome::Ready(g) => g,
        GuardOutcome::Skip { .. } => return (true, None), // UnsafeZeroPage: not an error, silently skipped
    };

    arena.write_fragment_at(params.opcode_offset, &fragment.bytes);

    let addresses = address_pair(&case.template, &params);
    let crosses = matches!(case.template.family, AddressingFamily::BranchTaken)
        && crate::synth::different_pages(entry_addr, entry_addr.wrapping_add(params.displacement as u16));
    let prediction: Prediction = if case.template.family == AddressingFamily::Brk {
        crate::predict::predict_brk(hooks.irq_platform_overhead(), case.template.instruction_cycles_base)
    } else {
        predict(&case.template, addresses, crosses)
    };

    let actual = oracle.measure(entry_addr, &fragment.bytes, &prediction);

    let dest = arena.as_mut_slice();
    guard.restore(|addr, value| dest[addr as usize] = value);

    let success = actual == prediction.total_cycles() as i32;
    let mismatch = if success {
        None
    } else {
        Some(TimingMismatch {
            description: case.description.clone(),
            opcode_offset: case.template.opcode,
            operand: params.imm,
            reg_x: params.reg_x,
            reg_y: params.reg_y,
            address_offset: params.abs_address,
            zp_address: params.zp_address,
            predicted_cycles: prediction.total_cycles(),
            actual_cycles: actual,
        })
    };
    (success, mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::hooks::HeadlessHooks;
    use crate::oracle::SimulatorOracle;

    fn lda_abs_x_case() -> OpcodeCase {
        OpcodeCase {
            template: OpcodeTemplate::new(AddressingFamily::ReadAbsX, 0xBD),
            description: "LDA abs,X".to_string(),
        }
    }

    /// Against the self-consistent `SimulatorOracle`, every indexed
    /// sweep is trivially all-passing (the oracle echoes the
    /// prediction it was handed).
    #[test]
    fn simulator_oracle_run_is_always_self_consistent() {
        let mut arena = Arena::allocate(2048).unwrap();
        let mut oracle = SimulatorOracle::new();
        let mut hooks = HeadlessHooks::new();
        let mut counters = Counters::default();

        let case = lda_abs_x_case();
        let params = CaseParams {
            abs_address: 0x0201,
            ..Default::default()
        };
        let mismatches = run_indexed_family(
            &case,
            &mut arena,
            &mut oracle,
            &mut hooks,
            params,
            85,
            &mut counters,
            RunMode::CollectAll,
        );
        assert!(mismatches.is_empty());
        assert!(counters.all_passed());
        assert_eq!(counters.test_count, crate::config::step_values(85).len() as u64);
    }

    /// A deliberately wrong oracle (always returns 0 cycles) produces
    /// one mismatch per iteration and `StopOnError` halts after the first.
    struct AlwaysZeroOracle;
    impl CycleOracle for AlwaysZeroOracle {
        fn measure(&mut self, _entry: u16, _bytes: &[u8], _predicted: &Prediction) -> i32 {
            0
        }
    }

    #[test]
    fn stop_on_error_halts_after_first_mismatch() {
        let mut arena = Arena::allocate(2048).unwrap();
        let mut oracle = AlwaysZeroOracle;
        let mut hooks = HeadlessHooks::new();
        let mut counters = Counters::default();

        let case = lda_abs_x_case();
        let params = CaseParams {
            abs_address: 0x0201,
            ..Default::default()
        };
        let mismatches = run_indexed_family(
            &case,
            &mut arena,
            &mut oracle,
            &mut hooks,
            params,
            85,
            &mut counters,
            RunMode::StopOnError,
        );
        assert_eq!(mismatches.len(), 1);
        assert_eq!(counters.test_count, 1);
    }

    /// `run_case` dispatches single-byte implied opcodes (e.g. `CLC`)
    /// through `run_fixed`: exactly one measurement, no parameter sweep.
    #[test]
    fn run_case_fixed_family_measures_once() {
        let mut arena = Arena::allocate(2048).unwrap();
        let mut oracle = SimulatorOracle::new();
        let mut hooks = HeadlessHooks::new();
        let mut counters = Counters::default();

        let case = OpcodeCase {
            template: OpcodeTemplate::new(AddressingFamily::SingleByteImplied, 0x18), // CLC
            description: "CLC".to_string(),
        };
        let mismatches = run_case(
            &case,
            &mut arena,
            &mut oracle,
            &mut hooks,
            CaseParams::default(),
            85,
            &mut counters,
            RunMode::CollectAll,
        );
        assert!(mismatches.is_empty());
        assert_eq!(counters.test_count, 1);
    }

    /// `run_case` dispatches the two-byte implied family (`TSX; TXS`)
    /// through `run_fixed` as well, and the synthesized fragment
    /// actually carries the setup opcode ahead of the tested one.
    #[test]
    fn two_byte_implied_runs_once_with_setup_opcode() {
        let mut arena = Arena::allocate(2048).unwrap();
        let mut oracle = SimulatorOracle::new();
        let mut hooks = HeadlessHooks::new();
        let mut counters = Counters::default();

        let case = OpcodeCase {
            template: OpcodeTemplate::two_byte_implied(0xBA, 0x9A, 2, 2), // TSX; TXS
            description: "TXS".to_string(),
        };
        let mismatches = run_case(
            &case,
            &mut arena,
            &mut oracle,
            &mut hooks,
            CaseParams::default(),
            85,
            &mut counters,
            RunMode::CollectAll,
        );
        assert!(mismatches.is_empty());
        assert_eq!(counters.test_count, 1);

        let entry_offset = arena.anchor() - arena.base();
        assert_eq!(arena.as_slice()[entry_offset], 0xBA);
        assert_eq!(arena.as_slice()[entry_offset + 1], 0x9A);
    }

    /// BRK's prediction must route through `predict_brk` and pick up the
    /// host's IRQ platform overhead, not the generic per-family formula
    /// (whose `overhead_cycles` is a placeholder zero for this family).
    #[test]
    fn brk_prediction_includes_host_irq_overhead() {
        struct FixedIrqOverheadHooks(u32);
        impl HostHooks for FixedIrqOverheadHooks {
            fn irq_platform_overhead(&self) -> u32 {
                self.0
            }
        }

        let mut arena = Arena::allocate(2048).unwrap();
        let mut oracle = SimulatorOracle::new();
        let mut hooks = FixedIrqOverheadHooks(7);
        let mut counters = Counters::default();

        let case = OpcodeCase {
            template: OpcodeTemplate::new(AddressingFamily::Brk, 0x00),
            description: "BRK".to_string(),
        };
        // SimulatorOracle always echoes whatever prediction it is handed,
        // so this only proves run_one asked for the right prediction in
        // the first place, not that some independent measurement agreed.
        let mismatches = run_fixed(
            &case,
            &mut arena,
            &mut oracle,
            &mut hooks,
            CaseParams::default(),
            &mut counters,
        );
        assert!(mismatches.is_empty());

        struct RecordingOracle {
            seen: Option<Prediction>,
        }
        impl CycleOracle for RecordingOracle {
            fn measure(&mut self, _entry: u16, _bytes: &[u8], predicted: &Prediction) -> i32 {
                self.seen = Some(*predicted);
                predicted.total_cycles() as i32
            }
        }
        let mut recording = RecordingOracle { seen: None };
        let mut counters = Counters::default();
        run_fixed(
            &case,
            &mut arena,
            &mut recording,
            &mut hooks,
            CaseParams::default(),
            &mut counters,
        );
        let seen = recording.seen.expect("oracle should have been invoked");
        assert_eq!(seen.overhead_cycles, 2 + 4 + 7 + 4 + 2);
        assert_eq!(seen.instruction_cycles, 7);
    }
}
