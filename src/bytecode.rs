use anyhow::{Context, Result};

use crate::ir::InstructionCategory;
use crate::opcodes;

/// Walk a method's `Code` bytes and collect the ABC-relevant instructions.
pub(crate) fn instruction_categories(code: &[u8]) -> Result<Vec<InstructionCategory>> {
    let mut categories = Vec::new();
    let mut offset = 0;
    while offset < code.len() {
        if let Some(category) = categorize(code, offset)? {
            categories.push(category);
        }
        offset += opcode_length(code, offset)?;
    }
    Ok(categories)
}

fn categorize(code: &[u8], offset: usize) -> Result<Option<InstructionCategory>> {
    let category = match code[offset] {
        opcodes::ISTORE..=opcodes::ASTORE_3 => InstructionCategory::VariableStore,
        opcodes::PUTSTATIC | opcodes::PUTFIELD => InstructionCategory::FieldStore,
        opcodes::IFEQ..=opcodes::IF_ACMPNE => InstructionCategory::ConditionalJump,
        // Null checks are plain branches, not comparisons.
        opcodes::GOTO
        | opcodes::JSR
        | opcodes::IFNULL
        | opcodes::IFNONNULL
        | opcodes::GOTO_W
        | opcodes::JSR_W => InstructionCategory::Jump,
        opcodes::TABLESWITCH => InstructionCategory::MultiWayBranch {
            targets: tableswitch_case_count(code, offset)?,
        },
        opcodes::LOOKUPSWITCH => InstructionCategory::MultiWayBranch {
            targets: lookupswitch_case_count(code, offset)?,
        },
        opcodes::WIDE => match code.get(offset + 1).copied() {
            Some(opcodes::ISTORE..=opcodes::ASTORE) => InstructionCategory::VariableStore,
            _ => return Ok(None),
        },
        _ => return Ok(None),
    };
    Ok(Some(category))
}

fn tableswitch_case_count(code: &[u8], offset: usize) -> Result<usize> {
    let base = offset + 1 + padding(offset);
    let low = read_i32(code, base + 4)?;
    let high = read_i32(code, base + 8)?;
    let count = i64::from(high) - i64::from(low) + 1;
    usize::try_from(count)
        .ok()
        .with_context(|| format!("invalid tableswitch range at offset {offset}"))
}

fn lookupswitch_case_count(code: &[u8], offset: usize) -> Result<usize> {
    let base = offset + 1 + padding(offset);
    let npairs = read_i32(code, base + 4)?;
    usize::try_from(npairs)
        .ok()
        .with_context(|| format!("invalid lookupswitch pair count at offset {offset}"))
}

/// Length in bytes of the instruction starting at `offset`.
fn opcode_length(code: &[u8], offset: usize) -> Result<usize> {
    let opcode = *code
        .get(offset)
        .with_context(|| format!("missing opcode at offset {offset}"))?;
    let length = match opcode {
        opcodes::TABLESWITCH => {
            1 + padding(offset) + 12 + 4 * tableswitch_case_count(code, offset)?
        }
        opcodes::LOOKUPSWITCH => {
            1 + padding(offset) + 8 + 8 * lookupswitch_case_count(code, offset)?
        }
        opcodes::WIDE => {
            if code.get(offset + 1) == Some(&opcodes::IINC) {
                6
            } else {
                4
            }
        }
        0x00..=0x0f
        | 0x1a..=0x35
        | 0x3b..=0x83
        | 0x85..=0x98
        | 0xac..=0xb1
        | 0xbe
        | 0xbf
        | 0xc2
        | 0xc3
        | 0xca => 1,
        0x10 | 0x12 | 0x15..=0x19 | 0x36..=0x3a | 0xa9 | 0xbc => 2,
        0x11
        | 0x13
        | 0x14
        | opcodes::IINC
        | 0x99..=0xa8
        | 0xb2..=0xb8
        | 0xbb
        | 0xbd
        | 0xc0
        | 0xc1
        | 0xc6
        | 0xc7 => 3,
        0xc5 => 4,
        0xb9 | 0xba | 0xc8 | 0xc9 => 5,
        _ => anyhow::bail!("unknown opcode 0x{opcode:02x} at offset {offset}"),
    };
    if offset + length > code.len() {
        anyhow::bail!("truncated instruction 0x{opcode:02x} at offset {offset}");
    }
    Ok(length)
}

/// Switch operands are aligned to four bytes from the start of the code array.
fn padding(offset: usize) -> usize {
    (4 - (offset + 1) % 4) % 4
}

fn read_u32(code: &[u8], offset: usize) -> Result<u32> {
    let bytes = code
        .get(offset..offset + 4)
        .with_context(|| format!("truncated operand at offset {offset}"))?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn read_i32(code: &[u8], offset: usize) -> Result<i32> {
    let value = read_u32(code, offset)?;
    Ok(i32::from_be_bytes(value.to_be_bytes()))
}
