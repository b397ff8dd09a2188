//! Execute, part one: ALU and address computation.
//!
//! ALU results (and `MOVC`'s immediate) are computed here but do not
//! commit until Execute2: the result is carried forward in `buffer`, and
//! it is Execute2 - reading this latch next cycle - that writes the
//! register file and supplies the value on the forwarding slot, which is
//! what lets it reach a stalled Decode one cycle earlier than Writeback
//! would allow.

use crate::isa::Opcode;
use crate::core::pipeline::{Latch, Stage};
use crate::core::Cpu;

/// Run the Execute1 stage for one cycle.
pub fn run(cpu: &mut Cpu) {
    let input = cpu.latches[Stage::Execute1.index()].clone();
    if !input.is_occupied() {
        cpu.latches[Stage::Execute2.index()] = Latch::bubble();
        return;
    }

    let instruction = input.instruction;
    let mut output = Latch::bubble();
    output.instruction = instruction;
    output.pc = input.pc;
    output.rs1_value = input.rs1_value;
    output.rs2_value = input.rs2_value;
    output.rs3_value = input.rs3_value;

    match instruction.opcode {
        Opcode::Movc => output.buffer = instruction.imm,
        Opcode::Add => output.buffer = input.rs1_value.wrapping_add(input.rs2_value),
        Opcode::Addl => output.buffer = input.rs1_value.wrapping_add(instruction.imm),
        Opcode::Sub => output.buffer = input.rs1_value.wrapping_sub(input.rs2_value),
        Opcode::Mul => output.buffer = input.rs1_value.wrapping_mul(input.rs2_value),
        Opcode::And => output.buffer = input.rs1_value & input.rs2_value,
        Opcode::Or => output.buffer = input.rs1_value | input.rs2_value,
        Opcode::Xor => output.buffer = input.rs1_value ^ input.rs2_value,
        Opcode::Load => output.mem_address = input.rs1_value.wrapping_add(instruction.imm),
        Opcode::Store => output.mem_address = input.rs2_value.wrapping_add(instruction.imm),
        Opcode::Ldr => output.mem_address = input.rs1_value.wrapping_add(input.rs2_value),
        Opcode::Str => output.mem_address = input.rs2_value.wrapping_add(input.rs3_value),
        Opcode::Bz | Opcode::Bnz | Opcode::Jump | Opcode::Halt | Opcode::Bubble | Opcode::Unknown => {}
    }

    cpu.latches[Stage::Execute2.index()] = output;
}
