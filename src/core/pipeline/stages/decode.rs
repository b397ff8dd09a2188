//! Decode and register-file read.
//!
//! A source register that is not yet valid stalls Decode unless this
//! cycle's forwarding slot supplies exactly that register - in which case
//! Decode receives the forwarded value instead of waiting. A stall holds
//! this stage's own latch in place (re-tried next cycle) and tells Fetch,
//! which runs later this same tick, to hold the program counter too.
//!
//! `BZ`/`BNZ` have no source registers to forward, but they do read the
//! single zero flag: there is no per-register slot for it, so a branch
//! instead stalls outright whenever a flag-defining instruction is still
//! in flight ahead of it (anywhere from Execute2 through Writeback),
//! rather than trying to forward the flag.

use crate::core::pipeline::{Latch, Stage};
use crate::core::Cpu;

/// Run the Decode/RF stage for one cycle.
pub fn run(cpu: &mut Cpu) {
    let input = cpu.latches[Stage::DecodeRf.index()].clone();

    if !input.is_occupied() {
        cpu.latches[Stage::Execute1.index()] = Latch::bubble();
        return;
    }

    let instruction = input.instruction;

    if instruction.opcode.is_branch() && flag_definer_in_flight(cpu) {
        stall(cpu);
        return;
    }

    let mut rs1_value = 0;
    let mut rs2_value = 0;
    let mut rs3_value = 0;

    if instruction.opcode.reads_rs1() && !resolve(cpu, instruction.rs1, &mut rs1_value) {
        stall(cpu);
        return;
    }
    if instruction.opcode.reads_rs2() && !resolve(cpu, instruction.rs2, &mut rs2_value) {
        stall(cpu);
        return;
    }
    if instruction.opcode.reads_rs3() && !resolve(cpu, instruction.rs3, &mut rs3_value) {
        stall(cpu);
        return;
    }

    if instruction.opcode.writes_rd() {
        cpu.register_file.mark_invalid(instruction.rd);
    }

    let mut output = Latch::bubble();
    output.instruction = instruction;
    output.pc = input.pc;
    output.rs1_value = rs1_value;
    output.rs2_value = rs2_value;
    output.rs3_value = rs3_value;
    cpu.latches[Stage::Execute1.index()] = output;
    cpu.latches[Stage::DecodeRf.index()] = Latch::bubble();
}

/// Try to produce a value for register `reg`: from the register file if
/// valid, or from this cycle's forwarding slot. Returns `false` (and
/// leaves `*out` untouched) if neither source has it yet.
fn resolve(cpu: &Cpu, reg: usize, out: &mut i32) -> bool {
    if cpu.register_file.is_valid(reg) {
        *out = cpu.register_file.read(reg);
        return true;
    }
    if let Some((forward_reg, value)) = cpu.forwarded() {
        if forward_reg == reg {
            *out = value;
            return true;
        }
    }
    false
}

/// Whether a still-in-flight instruction (Execute2 through Writeback)
/// will define the zero flag, meaning a branch behind it cannot yet read
/// a settled value.
fn flag_definer_in_flight(cpu: &Cpu) -> bool {
    [
        Stage::Execute2,
        Stage::Memory1,
        Stage::Memory2,
        Stage::Writeback,
    ]
    .iter()
    .any(|&stage| {
        let latch = &cpu.latches[stage.index()];
        latch.is_occupied() && latch.instruction.opcode.sets_flag()
    })
}

fn stall(cpu: &mut Cpu) {
    cpu.set_fetch_hold(true);
    cpu.latches[Stage::DecodeRf.index()].stalled = true;
    cpu.latches[Stage::Execute1.index()] = Latch::bubble();
}
