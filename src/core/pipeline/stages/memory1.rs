//! Memory, part one: data memory access begins.
//!
//! `LOAD`/`LDR` read memory here but, like the ALU's early commit, the
//! value does not become architectural until Memory2 - it is carried
//! forward in `buffer` and Memory2 commits and forwards it next cycle.
//! `STORE`/`STR` write memory directly here - stores have no destination
//! register, so there is nothing to forward and nothing to delay.

use crate::isa::Opcode;
use crate::core::pipeline::{Latch, Stage};
use crate::core::Cpu;

/// Run the Memory1 stage for one cycle.
pub fn run(cpu: &mut Cpu) {
    let input = cpu.latches[Stage::Memory1.index()].clone();
    if !input.is_occupied() {
        cpu.latches[Stage::Memory2.index()] = Latch::bubble();
        return;
    }

    let instruction = input.instruction;
    let mut output = Latch::bubble();
    output.instruction = instruction;
    output.pc = input.pc;
    output.rs1_value = input.rs1_value;
    output.buffer = input.buffer;
    output.mem_address = input.mem_address;

    match instruction.opcode {
        Opcode::Load | Opcode::Ldr => {
            output.buffer = cpu.memory.read(input.mem_address);
        }
        Opcode::Store | Opcode::Str => {
            cpu.memory.write(input.mem_address, input.rs1_value);
        }
        _ => {}
    }

    cpu.latches[Stage::Memory2.index()] = output;
}
