//! One function per pipeline stage.
//!
//! Each function takes the whole `Cpu` and operates on exactly two of its
//! latches: its own (read-only, set by the previous stage last cycle) and
//! its successor's (written for next cycle). `Cpu::tick` calls these seven
//! functions in reverse pipeline order every cycle, which is what lets a
//! stage's output latch be safely overwritten before its reader has run.

/// Stage 1: instruction fetch.
pub mod fetch;

/// Stage 2: decode and register-file read.
pub mod decode;

/// Stage 3: execute, part one (ALU compute / address compute).
pub mod execute1;

/// Stage 4: execute, part two (ALU/`MOVC` commit, branch resolution).
pub mod execute2;

/// Stage 5: memory, part one (data memory access begins).
pub mod memory1;

/// Stage 6: memory, part two (`LOAD`/`LDR` commit).
pub mod memory2;

/// Stage 7: writeback / retirement.
pub mod writeback;
