//! Writeback: retirement bookkeeping.
//!
//! Nothing commits here architecturally any more - ALU/`MOVC` results
//! commit at Execute2 and `LOAD`/`LDR` results at Memory2 - but every
//! instruction still passes through Writeback to be counted as retired,
//! and a retiring `HALT` is what actually stops the simulation.

use crate::core::pipeline::Stage;
use crate::core::Cpu;

/// Run the Writeback stage for one cycle.
pub fn run(cpu: &mut Cpu) {
    let input = cpu.latches[Stage::Writeback.index()].clone();
    if !input.is_occupied() {
        return;
    }

    cpu.retired += 1;
    if input.instruction.is_halt() {
        cpu.halted = true;
    }
}
