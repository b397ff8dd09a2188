//! Opcodes and the instruction record they decorate.

use std::fmt;

/// The operation an [`Instruction`] performs.
///
/// `Bubble` and `Unknown` are not assembly mnemonics; they are produced by
/// the pipeline and the loader respectively, and every stage treats both as
/// "nothing architecturally happens here".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `MOVC Rd, #imm` — move a sign-extended immediate into `rd`.
    Movc,
    /// `ADD Rd, Rs1, Rs2` — integer add, sets the zero flag.
    Add,
    /// `ADDL Rd, Rs1, #imm` — add with sign-extended immediate.
    Addl,
    /// `SUB Rd, Rs1, Rs2` — integer subtract, sets the zero flag.
    Sub,
    /// `MUL Rd, Rs1, Rs2` — integer multiply, sets the zero flag.
    Mul,
    /// `AND Rd, Rs1, Rs2` — bitwise and.
    And,
    /// `OR Rd, Rs1, Rs2` — bitwise or.
    Or,
    /// `XOR Rd, Rs1, Rs2` — bitwise xor.
    Xor,
    /// `LOAD Rd, Rs1, #imm` — load word from `mem[rs1 + imm]` into `rd`.
    Load,
    /// `STORE Rs1, Rs2, #imm` — store `rs1` to `mem[rs2 + imm]`.
    Store,
    /// `LDR Rd, Rs1, Rs2` — load word from `mem[rs1 + rs2]` into `rd`.
    Ldr,
    /// `STR Rs1, Rs2, Rs3` — store `rs1` to `mem[rs2 + rs3]`.
    Str,
    /// `BZ #imm` — branch to `pc + imm` if the zero flag is set.
    Bz,
    /// `BNZ #imm` — branch to `pc + imm` if the zero flag is clear.
    Bnz,
    /// `JUMP Rs1, #imm` — absolute jump to `rs1 + imm`.
    Jump,
    /// `HALT` — stop fetching further instructions.
    Halt,
    /// No-op inserted by the pipeline (a flush or a stall slot).
    Bubble,
    /// A program line that did not parse as a known mnemonic.
    Unknown,
}

impl Opcode {
    /// The mnemonic as it would appear in a program listing or trace.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Movc => "MOVC",
            Opcode::Add => "ADD",
            Opcode::Addl => "ADDL",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Ldr => "LDR",
            Opcode::Str => "STR",
            Opcode::Bz => "BZ",
            Opcode::Bnz => "BNZ",
            Opcode::Jump => "JUMP",
            Opcode::Halt => "HALT",
            Opcode::Bubble => "",
            Opcode::Unknown => "UNKNOWN",
        }
    }

    /// Whether this opcode reads `rs1` at decode.
    pub fn reads_rs1(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Addl
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::And
                | Opcode::Or
                | Opcode::Xor
                | Opcode::Load
                | Opcode::Store
                | Opcode::Ldr
                | Opcode::Str
                | Opcode::Jump
        )
    }

    /// Whether this opcode reads `rs2` at decode.
    pub fn reads_rs2(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::And
                | Opcode::Or
                | Opcode::Xor
                | Opcode::Store
                | Opcode::Ldr
                | Opcode::Str
        )
    }

    /// Whether this opcode reads a third source register, `rs3` (`STR` only).
    pub fn reads_rs3(self) -> bool {
        matches!(self, Opcode::Str)
    }

    /// Whether this opcode writes an architectural register.
    pub fn writes_rd(self) -> bool {
        matches!(
            self,
            Opcode::Movc
                | Opcode::Add
                | Opcode::Addl
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::And
                | Opcode::Or
                | Opcode::Xor
                | Opcode::Load
                | Opcode::Ldr
        )
    }

    /// Whether this opcode's architectural result commits one cycle early,
    /// at Execute-2 rather than Writeback (`ADD`/`SUB`/`MUL`/logic/`MOVC`).
    pub fn commits_at_execute2(self) -> bool {
        matches!(
            self,
            Opcode::Movc
                | Opcode::Add
                | Opcode::Addl
                | Opcode::Sub
                | Opcode::Mul
                | Opcode::And
                | Opcode::Or
                | Opcode::Xor
        )
    }

    /// Whether this opcode's result commits at Memory-2 (`LOAD`/`LDR`).
    pub fn commits_at_memory2(self) -> bool {
        matches!(self, Opcode::Load | Opcode::Ldr)
    }

    /// Whether this opcode sets the zero flag.
    pub fn sets_flag(self) -> bool {
        matches!(self, Opcode::Add | Opcode::Addl | Opcode::Sub | Opcode::Mul)
    }

    /// Whether this opcode reads memory.
    pub fn reads_memory(self) -> bool {
        matches!(self, Opcode::Load | Opcode::Ldr)
    }

    /// Whether this opcode writes memory.
    pub fn writes_memory(self) -> bool {
        matches!(self, Opcode::Store | Opcode::Str)
    }

    /// Whether this opcode is a conditional branch.
    pub fn is_branch(self) -> bool {
        matches!(self, Opcode::Bz | Opcode::Bnz)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// One decoded instruction.
///
/// Not every field is meaningful for every opcode; [`Opcode::reads_rs1`] and
/// friends tell a stage which fields it should actually consult. Unused
/// fields are always zeroed by the loader, never left uninitialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Destination register index, when `opcode.writes_rd()`.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Third source register index (`STR` only).
    pub rs3: usize,
    /// Literal (sign-extended) immediate, when the opcode has one.
    pub imm: i32,
}

impl Instruction {
    /// A bubble: an instruction slot with no architectural effect.
    pub fn bubble() -> Self {
        Instruction {
            opcode: Opcode::Bubble,
            rd: 0,
            rs1: 0,
            rs2: 0,
            rs3: 0,
            imm: 0,
        }
    }

    /// Whether this instruction is a bubble (flush/stall filler).
    pub fn is_bubble(&self) -> bool {
        self.opcode == Opcode::Bubble
    }

    /// Whether this instruction is `HALT`.
    pub fn is_halt(&self) -> bool {
        self.opcode == Opcode::Halt
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Opcode::Bubble => write!(f, ""),
            Opcode::Halt => write!(f, "HALT"),
            Opcode::Movc => write!(f, "MOVC R{},#{}", self.rd, self.imm),
            Opcode::Addl | Opcode::Load => {
                write!(f, "{} R{},R{},#{}", self.opcode, self.rd, self.rs1, self.imm)
            }
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::And | Opcode::Or | Opcode::Xor
            | Opcode::Ldr => write!(
                f,
                "{} R{},R{},R{}",
                self.opcode, self.rd, self.rs1, self.rs2
            ),
            Opcode::Store => write!(f, "STORE R{},R{},#{}", self.rs1, self.rs2, self.imm),
            Opcode::Str => write!(f, "STR R{},R{},R{}", self.rs1, self.rs2, self.rs3),
            Opcode::Bz | Opcode::Bnz => write!(f, "{} #{}", self.opcode, self.imm),
            Opcode::Jump => write!(f, "JUMP R{},#{}", self.rs1, self.imm),
            Opcode::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
