//! `tic` -- the interactive front-end to the conformance harness,
//! grounded on `command_line_loop()`/`tic_cmd_measurement_test()`/
//! `tic_cmd_cpu_test()` in `original_source/timing_test/tic_main.c` and
//! its siblings, with the CLI/logging ambient style (`clap::Parser`,
//! `tracing_subscriber`, `ExitCode`) of `19h-isa-classifier`.

use std::io::{self, BufRead, Write as _};
use std::process::ExitCode;

use clap::Parser;

use mos65xx_conformance::config::{self, Args, Config};
use mos65xx_conformance::cpu_test_table;
use mos65xx_conformance::differential;
use mos65xx_conformance::hooks::{HeadlessHooks, HostHooks};
use mos65xx_conformance::oracle::SimulatorOracle;
use mos65xx_conformance::reference_table::ReferenceTable;
use mos65xx_conformance::report::Counters;
use mos65xx_conformance::timing_driver::{self, RunMode};
use mos65xx_conformance::variant::CpuVariant;
use mos65xx_conformance::ConformanceError;

/// CPU signature strings in `get_cpu_signature()`'s `{0,1,2,3}` order
/// (spec §4.9).
const SIGNATURE_NAMES: [&str; 4] = [
    "6502 with decimal mode",
    "6502 without decimal mode",
    "65C02",
    "unknown",
];

fn signature_name(variant: Option<CpuVariant>) -> &'static str {
    match variant {
        Some(v) => SIGNATURE_NAMES[v.signature() as usize],
        None => SIGNATURE_NAMES[3],
    }
}

fn print_help() {
    println!("commands:");
    println!("  msm [reps] min max   burn-cycle self-test (1 arg: min=max=arg, 2 args: reps=1)");
    println!("  cpu <level>          run the opcode timing sweep at coverage level 0..=7");
    println!("  quit                 exit");
}

/// Parse an `msm` command line the way the original's `sscanf` cascade
/// does: three arguments set `(repeats, min, max)` directly; two set
/// `(1, min, max)`; one sets `(1, arg, arg)`.
fn parse_msm(rest: &[&str]) -> Option<(u32, u32, u32)> {
    match rest.len() {
        1 => {
            let v: u32 = rest[0].parse().ok()?;
            Some((1, v, v))
        }
        2 => {
            let min: u32 = rest[0].parse().ok()?;
            let max: u32 = rest[1].parse().ok()?;
            Some((1, min, max))
        }
        3 => {
            let reps: u32 = rest[0].parse().ok()?;
            let min: u32 = rest[1].parse().ok()?;
            let max: u32 = rest[2].parse().ok()?;
            Some((reps, min, max))
        }
        _ => None,
    }
}

/// Build a fragment that burns exactly `cycles` cycles, grounded on
/// `generate_code()` in `tic_cmd_measurement_test.c`: alternate a 3-cycle
/// `LDA zp_address` (for an odd cycle remainder) and a 2-cycle `NOP`
/// (for an even remainder), until none remain, then terminate with RTS.
/// The original asserts `cycles != 1` (unsynthesizable); this returns
/// `None` in that case instead.
fn generate_burn_code(cycles: u32, zp_address: u8) -> Option<Vec<u8>> {
    if cycles == 1 {
        return None;
    }
    let mut bytes = Vec::new();
    let mut remaining = cycles;
    while remaining > 0 {
        if remaining % 2 == 1 {
            bytes.push(0xA5); // LDA zp
            bytes.push(zp_address);
            remaining -= 3;
        } else {
            bytes.push(0xEA); // NOP
            remaining -= 2;
        }
    }
    bytes.push(0x60); // RTS
    Some(bytes)
}

/// `msm` -- burn-cycle self-test, grounded on `run_measurement_tests()`:
/// for each repeat and each cycle count in `min..=max` (skipping 1,
/// which can't be synthesized), measure the generated fragment against
/// a fixed zero-overhead prediction and compare.
fn run_msm(
    reps: u32,
    min_cycles: u32,
    max_cycles: u32,
    hooks: &mut dyn HostHooks,
    counters: &mut Counters,
) {
    use mos65xx_conformance::arena::Arena;
    use mos65xx_conformance::oracle::CycleOracle;
    use mos65xx_conformance::predict::Prediction;

    let mut arena = match Arena::allocate(2048) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("arena allocation failed: {e}");
            return;
        }
    };
    let mut oracle = SimulatorOracle::new();
    let zp_address: u8 = 0x10;

    hooks.pre_big_measurement_block();
    for _repeat in 1..=reps {
        for cycle_count in min_cycles..=max_cycles {
            if cycle_count == 1 {
                continue;
            }
            let Some(bytes) = generate_burn_code(cycle_count, zp_address) else {
                continue;
            };
            let anchor_rel = arena.anchor() - arena.base();
            let entry = anchor_rel as u16;
            arena.write_fragment_at(0, &bytes);

            let prediction = Prediction {
                overhead_cycles: 0,
                instruction_cycles: cycle_count,
                page_crossing_cycles: 0,
            };
            let actual = oracle.measure(entry, &bytes, &prediction);
            let success = actual == prediction.total_cycles() as i32;
            counters.record(success);
            if !success {
                println!(
                    "msm mismatch: cycle_count={cycle_count} predicted={} actual={actual}",
                    prediction.total_cycles()
                );
            }
            let keep_going = hooks.post_every_measurement(
                success,
                0,
                counters.test_count,
                counters.error_count,
            );
            if !keep_going {
                hooks.post_big_measurement_block();
                return;
            }
        }
    }
    hooks.post_big_measurement_block();
}

/// `cpu <level>` -- run the opcode timing sweep at `level`'s
/// `STEP_SIZE`, plus an ALU differential run against whichever
/// reference tables were supplied on the command line.
fn run_cpu_test(level: u8, config: &Config, tables: &Tables) {
    let Some(step_size) = config::step_size_for_level(level) else {
        println!("coverage level must be in 0..=7");
        return;
    };

    let variant = config.target_variant.unwrap_or(CpuVariant::Nmos6502);
    println!("target variant: {} ({})", variant.signature(), signature_name(Some(variant)));

    use mos65xx_conformance::arena::Arena;
    let mut arena = match Arena::allocate(2048) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("arena allocation failed: {e}");
            return;
        }
    };
    let mut oracle = SimulatorOracle::new();
    let mut hooks = HeadlessHooks::with_variant(variant);
    let mut counters = Counters::default();

    hooks.program_start();
    hooks.pre_big_measurement_block();
    for entry in cpu_test_table::documented_templates() {
        hooks.pre_opcode_test(&entry.case.description, false);
        let mismatches = timing_driver::run_case(
            &entry.case,
            &mut arena,
            &mut oracle,
            &mut hooks,
            entry.params,
            step_size,
            &mut counters,
            RunMode::CollectAll,
        );
        for m in &mismatches {
            println!(
                "timing mismatch: {} predicted={} actual={}",
                m.description, m.predicted_cycles, m.actual_cycles
            );
        }
    }
    hooks.post_big_measurement_block();

    println!(
        "opcode sweep: {} tests, {} errors",
        counters.test_count, counters.error_count
    );

    for (label, table) in [("NMOS", &tables.nmos), ("CMOS", &tables.cmos)] {
        if let Some(table) = table {
            let report = differential::run(variant, table, differential::RunMode::CollectAll);
            println!(
                "{label} ALU differential: {} points checked, {} mismatches",
                report.points_checked,
                report.mismatches.len()
            );
        }
    }
    hooks.program_end();
}

struct Tables {
    nmos: Option<ReferenceTable>,
    cmos: Option<ReferenceTable>,
}

fn load_tables(args: &Args) -> Result<Tables, ConformanceError> {
    let nmos = args.nmos_table.as_ref().map(ReferenceTable::load).transpose()?;
    let cmos = args.cmos_table.as_ref().map(ReferenceTable::load).transpose()?;
    Ok(Tables { nmos, cmos })
}

fn command_line_loop(config: &Config, tables: &Tables) {
    let stdin = io::stdin();
    let mut counters = Counters::default();
    let mut hooks = HeadlessHooks::with_variant(config.target_variant.unwrap_or(CpuVariant::Nmos6502));

    print!("tic> ");
    let _ = io::stdout().flush();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.first() {
            Some(&"quit") => break,
            Some(&"msm") => match parse_msm(&words[1..]) {
                Some((reps, min, max)) => run_msm(reps, min, max, &mut hooks, &mut counters),
                None => println!("usage: msm [reps] min max"),
            },
            Some(&"cpu") => match words.get(1).and_then(|s| s.parse::<u8>().ok()) {
                Some(level) => run_cpu_test(level, config, tables),
                None => println!("usage: cpu <level 0..=7>"),
            },
            _ => print_help(),
        }
        print!("tic> ");
        let _ = io::stdout().flush();
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    let config = args.to_config();

    let tables = match load_tables(&args) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("*** mos65xx-conformance tic v1.0 ***");
    println!("cpu signature: {}", signature_name(config.target_variant));

    command_line_loop(&config, &tables);

    ExitCode::SUCCESS
}
