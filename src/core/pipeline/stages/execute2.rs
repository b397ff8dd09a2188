//! Execute, part two: ALU/`MOVC` commit and branch resolution.
//!
//! This is where ALU and `MOVC` results become architectural: the
//! register file is written here, one stage earlier than Writeback, and
//! the value is simultaneously supplied on the forwarding slot so Decode
//! can receive it this same cycle. Conditional branches are also resolved
//! here, since they need the zero flag an `ADD`/`ADDL`/`SUB`/`MUL` ahead of
//! them in the pipe has already committed. A taken branch consumes and
//! clears the flag, so a later branch with no intervening flag-setter
//! reads a defined "not zero" rather than a stale value.

use crate::isa::Opcode;
use crate::core::pipeline::{Latch, Stage};
use crate::core::Cpu;

/// Run the Execute2 stage for one cycle.
pub fn run(cpu: &mut Cpu) {
    let input = cpu.latches[Stage::Execute2.index()].clone();
    if !input.is_occupied() {
        cpu.latches[Stage::Memory1.index()] = Latch::bubble();
        return;
    }

    let instruction = input.instruction;

    if instruction.opcode.sets_flag() {
        cpu.zero_flag = input.buffer == 0;
    }

    if instruction.opcode.commits_at_execute2() && instruction.opcode.writes_rd() {
        cpu.register_file.write(instruction.rd, input.buffer);
        cpu.supply_forward(instruction.rd, input.buffer);
    }

    match instruction.opcode {
        Opcode::Bz if cpu.zero_flag => take_branch(cpu, input.pc, instruction.imm),
        Opcode::Bnz if !cpu.zero_flag => take_branch(cpu, input.pc, instruction.imm),
        Opcode::Jump => {
            // Updates pc without flushing the instructions already fetched
            // behind it; those continue down the wrong path. Kept as-is:
            // matching the reference simulator's behaviour exactly.
            cpu.pc = input.rs1_value.wrapping_add(instruction.imm);
        }
        _ => {}
    }

    let mut output = Latch::bubble();
    output.instruction = instruction;
    output.pc = input.pc;
    output.rs1_value = input.rs1_value;
    output.rs2_value = input.rs2_value;
    output.rs3_value = input.rs3_value;
    output.buffer = input.buffer;
    output.mem_address = input.mem_address;
    cpu.latches[Stage::Memory1.index()] = output;
}

fn take_branch(cpu: &mut Cpu, branch_pc: i32, imm: i32) {
    cpu.pc = branch_pc.wrapping_add(imm);
    cpu.zero_flag = false;
    cpu.flush_for_branch();
}
