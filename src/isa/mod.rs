//! APEX instruction set: opcodes, instruction records, and the textual
//! program loader.

/// Opcode and instruction record definitions.
pub mod opcode;

/// Textual assembly loader (the "code loader" external collaborator).
pub mod loader;

pub use opcode::{Instruction, Opcode};
