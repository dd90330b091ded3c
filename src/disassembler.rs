use crate::bus::Memory;
use crate::cpu::opcodes::{AddrMode, OPCODES};

/// Decodes the instruction at `address`, reading its operand bytes straight
/// from `bus`. Returns the text and the instruction's size in bytes.
///
/// Relative branches are shown with their resolved target, not the raw
/// displacement. Undocumented opcodes come out as `???` and count as one
/// byte.
pub fn disassemble_one<M: Memory>(bus: &M, address: u16) -> (String, u16) {
    let opcode = OPCODES[bus.read(address) as usize];
    let mnemonic = opcode.instruction.mnemonic();
    let byte = |n: u16| bus.read(address.wrapping_add(n));
    let word = || bus.read_word(address.wrapping_add(1));

    let operand = match opcode.mode {
        AddrMode::Implied => String::new(),
        AddrMode::Accumulator => "A".to_string(),
        AddrMode::Immediate => format!("#${:02X}", byte(1)),
        AddrMode::ZeroPage => format!("${:02X}", byte(1)),
        AddrMode::ZeroPageX => format!("${:02X},X", byte(1)),
        AddrMode::ZeroPageY => format!("${:02X},Y", byte(1)),
        AddrMode::Relative => {
            let next = address.wrapping_add(2);
            let target = next.wrapping_add(byte(1) as i8 as i16 as u16);
            format!("${:04X}", target)
        }
        AddrMode::Absolute => format!("${:04X}", word()),
        AddrMode::AbsoluteX => format!("${:04X},X", word()),
        AddrMode::AbsoluteY => format!("${:04X},Y", word()),
        AddrMode::Indirect => format!("(${:04X})", word()),
        AddrMode::IndexedIndirect => format!("(${:02X},X)", byte(1)),
        AddrMode::IndirectIndexed => format!("(${:02X}),Y", byte(1)),
    };

    let text = if operand.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{} {}", mnemonic, operand)
    };
    (text, opcode.size())
}

/// Disassembles `count` consecutive instructions starting at `start`.
pub fn disassemble_range<M: Memory>(bus: &M, start: u16, count: usize) -> Vec<(u16, String, u16)> {
    let mut lines = Vec::with_capacity(count);
    let mut address = start;
    for _ in 0..count {
        let (text, size) = disassemble_one(bus, address);
        lines.push((address, text, size));
        address = address.wrapping_add(size);
    }
    lines
}
