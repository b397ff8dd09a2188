//! End-to-end tests driving the pipeline through small APEX programs.

use apex_sim::core::Cpu;
use apex_sim::isa::loader;

/// Assembles `source` and runs it to completion (or until `cycle_budget`
/// cycles have elapsed), returning the resulting `Cpu`.
fn run_program(source: &str, cycle_budget: u64) -> Cpu {
    let program = loader::parse_program(source).expect("program should parse");
    let mut cpu = Cpu::new(program, cycle_budget, false);
    cpu.run();
    cpu
}

#[test]
fn movc_and_add_commit_through_the_register_file() {
    let cpu = run_program(
        "MOVC R0, #10\n\
         MOVC R1, #20\n\
         ADD R2, R0, R1\n\
         HALT\n",
        30,
    );
    assert!(cpu.halted);
    let registers = cpu.register_snapshot(3);
    assert_eq!(registers[0], (10, true));
    assert_eq!(registers[1], (20, true));
    assert_eq!(registers[2], (30, true));
}

#[test]
fn raw_hazard_resolves_through_forwarding_without_stalling_fetch() {
    // ADD depends on the MOVC immediately ahead of it; the early
    // Execute2 commit plus forwarding should let this run with no decode
    // stall, i.e. well within a generous cycle budget.
    let cpu = run_program(
        "MOVC R0, #5\n\
         ADD R1, R0, R0\n\
         HALT\n",
        20,
    );
    assert!(cpu.halted);
    let registers = cpu.register_snapshot(2);
    assert_eq!(registers[0], (5, true));
    assert_eq!(registers[1], (10, true));
}

#[test]
fn load_use_hazard_stalls_decode_until_memory2_commits() {
    let cpu = run_program(
        "MOVC R0, #0\n\
         MOVC R1, #99\n\
         STORE R1, R0, #0\n\
         LOAD R2, R0, #0\n\
         ADD R3, R2, R2\n\
         HALT\n",
        40,
    );
    assert!(cpu.halted);
    let registers = cpu.register_snapshot(4);
    assert_eq!(registers[2], (99, true));
    assert_eq!(registers[3], (198, true));
    assert_eq!(cpu.memory_snapshot(1)[0], 99);
}

#[test]
fn not_taken_branch_falls_through_normally() {
    // BNZ is never taken here (R0 - R0 == 0), so R5 should be written by
    // the ADDL that follows it, not skipped.
    let cpu = run_program(
        "MOVC R0, #1\n\
         SUB R1, R0, R0\n\
         BNZ #8\n\
         ADDL R5, R0, #100\n\
         HALT\n",
        40,
    );
    assert!(cpu.halted);
    assert_eq!(cpu.register_snapshot(6)[5], (101, true));
}

#[test]
fn taken_branch_skips_the_squashed_instruction() {
    // SUB R0,R0 sets the zero flag; BZ jumps over the ADDL, so R5 must
    // still hold its initial value of zero.
    let cpu = run_program(
        "MOVC R0, #1\n\
         SUB R1, R0, R0\n\
         BZ #8\n\
         ADDL R5, R0, #100\n\
         HALT\n",
        40,
    );
    assert!(cpu.halted);
    assert_eq!(cpu.register_snapshot(6)[5], (0, true));
}

#[test]
fn jump_redirects_pc_without_flushing_in_flight_instructions() {
    // The ADDL right behind JUMP has already been fetched by the time
    // JUMP resolves, and this simulator's JUMP deliberately does not
    // flush it - it still executes, landing in R6.
    let cpu = run_program(
        "MOVC R0, #4040\n\
         JUMP R0, #0\n\
         ADDL R6, R0, #1\n\
         HALT\n\
         HALT\n\
         HALT\n\
         HALT\n\
         HALT\n\
         HALT\n\
         HALT\n\
         MOVC R7, #77\n",
        60,
    );
    assert_eq!(cpu.register_snapshot(7)[6], (4041, true));
}

#[test]
fn branch_after_arith_stalls_until_the_flag_settles() {
    // BZ reads the zero flag set by the SUB immediately ahead of it; it
    // must stall in Decode rather than racing ahead on a stale flag. The
    // flag is 0 (not taken), so R5 is written by the ADDL that follows.
    let cpu = run_program(
        "MOVC R0, #1\n\
         MOVC R1, #2\n\
         SUB R2, R1, R0\n\
         BZ #8\n\
         ADDL R5, R0, #100\n\
         HALT\n",
        40,
    );
    assert!(cpu.halted);
    assert_eq!(cpu.register_snapshot(6)[5], (101, true));
}

#[test]
fn taken_branch_compensates_the_retired_count() {
    // BZ (at address 4008) jumps clear over the two ADDLs immediately
    // behind it to the HALT at 4024: those two are squashed and must
    // never be counted as retired, even though one of them was already
    // sitting in Decode's latch when the branch resolved.
    let cpu = run_program(
        "MOVC R0, #1\n\
         SUB R1, R0, R0\n\
         BZ #16\n\
         ADDL R5, R0, #100\n\
         ADDL R5, R0, #200\n\
         ADDL R5, R0, #300\n\
         HALT\n",
        60,
    );
    assert!(cpu.halted);
    // MOVC, SUB, BZ, HALT retire; the two flushed ADDLs do not, and the
    // third is never even fetched.
    assert_eq!(cpu.retired, 4);
}

#[test]
fn halt_retiring_stops_the_simulation_before_the_cycle_budget() {
    let cpu = run_program("HALT\n", 1000);
    assert!(cpu.halted);
    assert!(cpu.cycle < 1000);
}

#[test]
fn cycle_budget_bounds_a_program_that_never_halts() {
    let cpu = run_program("MOVC R0, #1\nADD R1, R0, R0\n", 5);
    assert!(!cpu.halted);
    assert_eq!(cpu.cycle, 5);
}
