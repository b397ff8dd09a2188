//! Fetch: read the next instruction and hand it to Decode.
//!
//! Fetch has no input latch of its own; it reads the program counter
//! directly. It runs last in tick order, so by the time it executes, any
//! branch or jump resolved at Execute2 this same cycle has already
//! redirected `pc` - Fetch simply follows it.

use crate::core::pipeline::{Latch, Stage};
use crate::core::Cpu;

/// Run the Fetch stage for one cycle.
pub fn run(cpu: &mut Cpu) {
    if cpu.is_fetch_held() {
        // Decode could not accept a new instruction this cycle (a hazard
        // it could not forward around); hold pc and re-fetch next cycle.
        return;
    }

    let instruction = cpu.fetch_at(cpu.pc);
    let mut latch = Latch::bubble();
    if !instruction.is_bubble() {
        latch.instruction = instruction;
        latch.pc = cpu.pc;
        cpu.pc += 4;
    }
    cpu.latches[Stage::DecodeRf.index()] = latch;
}
