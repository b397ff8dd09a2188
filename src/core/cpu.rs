//! The `Cpu`: architectural state plus the tick/run loop that drives the
//! seven pipeline stages.

use crate::core::memory::DataMemory;
use crate::core::pipeline::stages::{decode, execute1, execute2, fetch, memory1, memory2, writeback};
use crate::core::pipeline::{Latch, Stage};
use crate::core::register_file::RegisterFile;
use crate::isa::Instruction;

/// Byte address of the first loaded instruction. `JUMP`/branch targets and
/// the code-memory index are both relative to this base, not to zero.
pub const CODE_BASE: i32 = 4000;

/// The APEX pipeline simulator's complete architectural and microarchitectural
/// state.
pub struct Cpu {
    /// Program counter, in bytes (instructions are 4 bytes apart),
    /// starting at [`CODE_BASE`].
    pub pc: i32,
    /// Integer register file.
    pub register_file: RegisterFile,
    /// Flat data memory.
    pub memory: DataMemory,
    /// The loaded program, indexed by `(pc - CODE_BASE) / 4`.
    pub code: Vec<Instruction>,
    /// One latch per stage; `latches[stage.index()]` is what that stage
    /// reads when it runs this cycle.
    pub latches: [Latch; 7],
    /// The single zero flag, set by `ADD`/`ADDL`/`SUB`/`MUL` and read by
    /// `BZ`/`BNZ`.
    pub zero_flag: bool,
    /// Count of instructions that have retired (passed Writeback).
    pub retired: usize,
    /// Number of cycles executed so far.
    pub cycle: u64,
    /// When set, every cycle's stage-by-stage trace is printed.
    pub trace: bool,
    /// Upper bound on cycles to run, independent of retirement.
    pub cycle_budget: u64,
    /// Whether a `HALT` has retired; once true, `run` stops.
    pub halted: bool,

    forward_slot: Option<(usize, i32)>,
    fetch_hold: bool,
}

impl Cpu {
    /// Build a fresh `Cpu` ready to execute `code` from [`CODE_BASE`].
    pub fn new(code: Vec<Instruction>, cycle_budget: u64, trace: bool) -> Self {
        Cpu {
            pc: CODE_BASE,
            register_file: RegisterFile::new(),
            memory: DataMemory::new(),
            code,
            latches: std::array::from_fn(|_| Latch::bubble()),
            zero_flag: false,
            retired: 0,
            cycle: 0,
            trace,
            cycle_budget,
            halted: false,
            forward_slot: None,
            fetch_hold: false,
        }
    }

    /// Fetch the instruction at `pc`, or a bubble if `pc` is before
    /// [`CODE_BASE`] or past the end of the loaded program.
    pub fn fetch_at(&self, pc: i32) -> Instruction {
        let offset = pc - CODE_BASE;
        if offset < 0 || offset % 4 != 0 {
            return Instruction::bubble();
        }
        let index = (offset / 4) as usize;
        self.code.get(index).copied().unwrap_or_else(Instruction::bubble)
    }

    /// Number of instructions in the loaded program.
    pub fn code_size(&self) -> usize {
        self.code.len()
    }

    /// The value currently available for Decode to receive through
    /// forwarding this cycle, if any.
    pub fn forwarded(&self) -> Option<(usize, i32)> {
        self.forward_slot
    }

    /// Arm the forwarding slot for this cycle (called by Execute2/Memory2
    /// when they commit a result early).
    pub fn supply_forward(&mut self, reg_index: usize, value: i32) {
        self.forward_slot = Some((reg_index, value));
    }

    /// Whether Decode held its latch in place this cycle (a hazard it
    /// could not resolve through forwarding); Fetch must also hold.
    pub fn is_fetch_held(&self) -> bool {
        self.fetch_hold
    }

    /// Record that Decode is holding its latch this cycle.
    pub fn set_fetch_hold(&mut self, hold: bool) {
        self.fetch_hold = hold;
    }

    /// Clear the squashed instructions in Decode's and Execute1's input
    /// latches after a taken branch resolves at Execute2. The program
    /// counter has already been redirected by the caller, so Fetch -
    /// which runs later this same cycle - picks up the correct-path
    /// instruction immediately; no separate fetch bubble is needed.
    ///
    /// `retired` is compensated by the number of real (non-bubble)
    /// instructions squashed here, so the final dump's retirement count
    /// reflects only instructions that actually executed, not the
    /// wrong-path ones discarded by the flush.
    pub fn flush_for_branch(&mut self) {
        let decode_slot = &mut self.latches[Stage::DecodeRf.index()];
        let squashed_decode = decode_slot.is_occupied();
        *decode_slot = Latch::bubble();

        let execute1_slot = &mut self.latches[Stage::Execute1.index()];
        let squashed_execute1 = execute1_slot.is_occupied();
        *execute1_slot = Latch::bubble();

        let squashed = squashed_decode as usize + squashed_execute1 as usize;
        self.retired = self.retired.saturating_sub(squashed);
    }

    /// Run one clock cycle: every stage, in reverse pipeline order.
    pub fn tick(&mut self) {
        self.forward_slot = None;
        self.fetch_hold = false;

        writeback::run(self);
        memory2::run(self);
        memory1::run(self);
        execute2::run(self);
        execute1::run(self);
        decode::run(self);
        fetch::run(self);

        if self.trace {
            crate::core::pipeline::trace::print_cycle(self.cycle, &self.latches);
        }
        self.cycle += 1;
    }

    /// Run until `HALT` retires or the cycle budget is exhausted.
    ///
    /// Termination does not wait for `retired == code_size`: a taken
    /// backward branch can retire more instructions than the program is
    /// long, and a taken forward branch can retire fewer, so only `HALT`
    /// retiring (or running out of cycles) is a reliable stopping point.
    pub fn run(&mut self) {
        while !self.halted && self.cycle < self.cycle_budget {
            self.tick();
        }
    }

    /// Snapshot of the first `count` architectural registers, as
    /// `(value, valid)` pairs.
    pub fn register_snapshot(&self, count: usize) -> Vec<(i32, bool)> {
        self.register_file.snapshot(count)
    }

    /// Snapshot of the first `count` data memory words.
    pub fn memory_snapshot(&self, count: usize) -> &[i32] {
        self.memory.snapshot(count)
    }
}
