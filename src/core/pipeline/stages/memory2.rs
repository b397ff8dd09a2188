//! Memory, part two: `LOAD`/`LDR` commit.
//!
//! Mirrors Execute2's early-commit role for ALU results: the loaded word
//! becomes architectural here, one stage ahead of Writeback, and is
//! simultaneously offered on the forwarding slot for Decode to receive
//! this same cycle.

use crate::isa::Opcode;
use crate::core::pipeline::{Latch, Stage};
use crate::core::Cpu;

/// Run the Memory2 stage for one cycle.
pub fn run(cpu: &mut Cpu) {
    let input = cpu.latches[Stage::Memory2.index()].clone();
    if !input.is_occupied() {
        cpu.latches[Stage::Writeback.index()] = Latch::bubble();
        return;
    }

    let instruction = input.instruction;

    if matches!(instruction.opcode, Opcode::Load | Opcode::Ldr) {
        cpu.register_file.write(instruction.rd, input.buffer);
        cpu.supply_forward(instruction.rd, input.buffer);
    }

    let mut output = Latch::bubble();
    output.instruction = instruction;
    output.pc = input.pc;
    cpu.latches[Stage::Writeback.index()] = output;
}
