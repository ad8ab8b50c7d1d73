/*!
discriminator - C6: bounded nondeterministic search for a short
[`Operation`](crate::limited_cpu::Operation) sequence that makes two or
more CPU variants land on distinct, initial-state-independent
accumulator values.

Grounded on
`original_source/functional_test/adc_sbc/cbmc/find_processor_discriminator.c`,
which poses this as a bounded model-checking query: find `operations[]`
(length `NUMOPS`, each `<= 0x707`) such that, for every initial
`(FlagD, FlagC, Accumulator)` the model checker considers, every
variant reaches the *same* target accumulator with `FlagD == false`,
and no two variants share a target. That file discharges the search to
a SAT-based model checker (CBMC); this module performs the equivalent
search directly, since this crate has no SAT solver dependency. The
initial-state grid it checks against mirrors the C harness exactly:
`FlagD in {0,1}`, `FlagC in {0,1}`, `Accumulator in {0, 17, 34, ..., 255}`
(sixteen values, step 17, per spec §4.4).
*/

use crate::limited_cpu::{self, CpuState, Operation};
use crate::variant::CpuVariant;

const ACCUMULATOR_STEP: u8 = 17;

/// Check whether `ops`, applied in sequence, discriminates `variants`:
/// every variant must reach a single fixed accumulator value regardless
/// of the initial `(FlagD, FlagC, Accumulator)` in the sampled grid,
/// must end with `FlagD == false`, and the per-variant target values
/// must be pairwise distinct.
///
/// Returns the per-variant targets (same order as `variants`) on
/// success.
pub fn targets_for(variants: &[CpuVariant], ops: &[Operation]) -> Option<Vec<u8>> {
    let mut targets = Vec::with_capacity(variants.len());
    for &variant in variants {
        let mut target: Option<u8> = None;
        for initial_d in [false, true] {
            for initial_c in [false, true] {
                let mut a: u16 = 0;
                while a <= 255 {
                    let mut state = CpuState {
                        a: a as u8,
                        c: initial_c,
                        d: initial_d,
                    };
                    for &op in ops {
                        state = limited_cpu::step(variant, state, op);
                    }
                    if state.d {
                        return None;
                    }
                    match target {
                        None => target = Some(state.a),
                        Some(t) if t == state.a => {}
                        Some(_) => return None,
                    }
                    a += ACCUMULATOR_STEP as u16;
                }
            }
        }
        targets.push(target.expect("grid is always non-empty"));
    }

    if has_duplicate(&targets) {
        return None;
    }
    Some(targets)
}

fn has_duplicate(targets: &[u8]) -> bool {
    for i in 0..targets.len() {
        for j in (i + 1)..targets.len() {
            if targets[i] == targets[j] {
                return true;
            }
        }
    }
    false
}

/// Search every sequence of length `1..=max_len` drawn (with
/// repetition) from `candidate_ops`, in lexicographic order, for the
/// first one [`targets_for`] accepts as a discriminator between
/// `variants`.
///
/// `candidate_ops` lets callers bound the search to a tractable
/// sub-alphabet instead of all 0x708 encodings (the CBMC harness relies
/// on a SAT solver to prune that space; this exhaustive search instead
/// relies on the caller to supply a small, relevant alphabet -- e.g.
/// `LDA`/flag-setters to pin down initial state, plus the ADC/SBC
/// operand actually suspected of diverging).
pub fn search(
    variants: &[CpuVariant],
    candidate_ops: &[Operation],
    max_len: usize,
) -> Option<Vec<Operation>> {
    if candidate_ops.is_empty() {
        return None;
    }
    for len in 1..=max_len {
        if let Some(found) = search_exact_len(variants, candidate_ops, len) {
            return Some(found);
        }
    }
    None
}

fn search_exact_len(
    variants: &[CpuVariant],
    candidate_ops: &[Operation],
    len: usize,
) -> Option<Vec<Operation>> {
    let n = candidate_ops.len();
    let mut idx = vec![0usize; len];
    loop {
        let seq: Vec<Operation> = idx.iter().map(|&i| candidate_ops[i]).collect();
        if targets_for(variants, &seq).is_some() {
            return Some(seq);
        }
        if !odometer_increment(&mut idx, n) {
            return None;
        }
    }
}

/// Increment `idx` like an odometer with `n` digits per wheel. Returns
/// `false` once every combination has been visited.
fn odometer_increment(idx: &mut [usize], n: usize) -> bool {
    for digit in idx.iter_mut().rev() {
        *digit += 1;
        if *digit < n {
            return true;
        }
        *digit = 0;
    }
    false
}
