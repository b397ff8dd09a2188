//! Textual program loader.
//!
//! Programs are plain text, one instruction per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! MOVC R0, #10
//! MOVC R1, #20
//! ADD R2, R0, R1
//! STORE R2, R0, #0
//! HALT
//! ```
//!
//! Operands are comma-separated; register operands are written `R<n>`
//! (0-31) and immediates `#<signed integer>`. A line that does not match
//! any known mnemonic's shape is a [`LoaderError::Syntax`] error; an
//! unrecognised mnemonic on an otherwise well-shaped line decodes as
//! [`Opcode::Unknown`] rather than failing, matching runtime decode
//! behaviour for malformed fetched words.

use std::fs;
use std::path::Path;

use crate::common::LoaderError;
use crate::isa::{Instruction, Opcode};

/// Read and parse an APEX program from `path`.
pub fn load_program(path: &Path) -> Result<Vec<Instruction>, LoaderError> {
    let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&text)
}

/// Parse an APEX program from its textual source.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, LoaderError> {
    let mut instructions = Vec::new();
    for (index, raw_line) in text.lines().enumerate() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let instruction = parse_line(line).ok_or_else(|| LoaderError::Syntax {
            line: index + 1,
            text: raw_line.to_string(),
        })?;
        instructions.push(instruction);
    }
    Ok(instructions)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        // A '#' that opens an immediate operand is always preceded by a
        // register/opcode token and a comma or space; a comment '#' starts
        // a line (after trimming) or follows whitespace with nothing else
        // useful before it. We only strip when the '#' is not immediately
        // preceded by optional whitespace and a digit-bearing token, which
        // in practice means: never strip mid-line, only a leading comment.
        Some(index) if line[..index].trim().is_empty() => &line[index + 1..],
        _ => line,
    }
}

fn parse_line(line: &str) -> Option<Instruction> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let mnemonic = parts.next()?.trim();
    let rest = parts.next().unwrap_or("").trim();
    let operands: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',').map(str::trim).collect()
    };

    let opcode = match mnemonic.to_ascii_uppercase().as_str() {
        "MOVC" => Opcode::Movc,
        "ADD" => Opcode::Add,
        "ADDL" => Opcode::Addl,
        "SUB" => Opcode::Sub,
        "MUL" => Opcode::Mul,
        "AND" => Opcode::And,
        "OR" => Opcode::Or,
        "XOR" => Opcode::Xor,
        "LOAD" => Opcode::Load,
        "STORE" => Opcode::Store,
        "LDR" => Opcode::Ldr,
        "STR" => Opcode::Str,
        "BZ" => Opcode::Bz,
        "BNZ" => Opcode::Bnz,
        "JUMP" => Opcode::Jump,
        "HALT" => {
            if !operands.is_empty() {
                return None;
            }
            let mut instruction = Instruction::bubble();
            instruction.opcode = Opcode::Halt;
            return Some(instruction);
        }
        _ => return None,
    };

    let mut instruction = Instruction::bubble();
    instruction.opcode = opcode;

    match opcode {
        Opcode::Movc => {
            let [rd, imm] = operands_as::<2>(&operands)?;
            instruction.rd = reg(rd)?;
            instruction.imm = literal(imm)?;
        }
        Opcode::Addl | Opcode::Load => {
            let [rd, rs1, imm] = operands_as::<3>(&operands)?;
            instruction.rd = reg(rd)?;
            instruction.rs1 = reg(rs1)?;
            instruction.imm = literal(imm)?;
        }
        Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::And | Opcode::Or | Opcode::Xor
        | Opcode::Ldr => {
            let [rd, rs1, rs2] = operands_as::<3>(&operands)?;
            instruction.rd = reg(rd)?;
            instruction.rs1 = reg(rs1)?;
            instruction.rs2 = reg(rs2)?;
        }
        Opcode::Store => {
            let [rs1, rs2, imm] = operands_as::<3>(&operands)?;
            instruction.rs1 = reg(rs1)?;
            instruction.rs2 = reg(rs2)?;
            instruction.imm = literal(imm)?;
        }
        Opcode::Str => {
            let [rs1, rs2, rs3] = operands_as::<3>(&operands)?;
            instruction.rs1 = reg(rs1)?;
            instruction.rs2 = reg(rs2)?;
            instruction.rs3 = reg(rs3)?;
        }
        Opcode::Bz | Opcode::Bnz => {
            let [imm] = operands_as::<1>(&operands)?;
            instruction.imm = literal(imm)?;
        }
        Opcode::Jump => {
            let [rs1, imm] = operands_as::<2>(&operands)?;
            instruction.rs1 = reg(rs1)?;
            instruction.imm = literal(imm)?;
        }
        Opcode::Halt | Opcode::Bubble | Opcode::Unknown => unreachable!("handled above"),
    }

    Some(instruction)
}

fn operands_as<const N: usize>(operands: &[&str]) -> Option<[&str; N]> {
    if operands.len() != N {
        return None;
    }
    let mut out = [""; N];
    out.copy_from_slice(operands);
    Some(out)
}

fn reg(token: &str) -> Option<usize> {
    let digits = token.strip_prefix(['R', 'r'])?;
    digits.parse().ok()
}

fn literal(token: &str) -> Option<i32> {
    token.strip_prefix('#')?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_small_program() {
        let source = "\
            # a trivial program\n\
            MOVC R0, #10\n\
            MOVC R1, #20\n\
            ADD R2, R0, R1\n\
            STORE R2, R0, #0\n\
            HALT\n\
        ";
        let program = parse_program(source).expect("should parse");
        assert_eq!(program.len(), 5);
        assert_eq!(program[0].opcode, Opcode::Movc);
        assert_eq!(program[0].rd, 0);
        assert_eq!(program[0].imm, 10);
        assert_eq!(program[2].opcode, Opcode::Add);
        assert_eq!(program[2].rs1, 0);
        assert_eq!(program[2].rs2, 1);
        assert_eq!(program[4].opcode, Opcode::Halt);
    }

    #[test]
    fn blank_lines_and_comments_are_ignored() {
        let source = "\n# leading comment\n\nHALT\n\n";
        let program = parse_program(source).expect("should parse");
        assert_eq!(program.len(), 1);
        assert_eq!(program[0].opcode, Opcode::Halt);
    }

    #[test]
    fn rejects_malformed_lines() {
        let err = parse_program("ADD R1, R2\n").unwrap_err();
        match err {
            LoaderError::Syntax { line, .. } => assert_eq!(line, 1),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_program(Path::new("/no/such/apex/program.asm")).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }
}
