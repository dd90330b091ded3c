//! The 256-entry decode table.
//!
//! Each opcode byte names an instruction, an addressing mode and a base cycle
//! count. The CPU dispatches through this table and the disassembler reads
//! mnemonics and operand sizes from it, so both always agree on instruction
//! length. Bytes that are not documented 6502 instructions decode to
//! `Instruction::Xxx`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

impl AddrMode {
    /// Instruction length in bytes, opcode included.
    pub fn size(self) -> u16 {
        use AddrMode::*;
        match self {
            Implied | Accumulator => 1,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndexedIndirect
            | IndirectIndexed => 2,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    /// Not a documented instruction.
    Xxx,
}

impl Instruction {
    #[rustfmt::skip]
    pub fn mnemonic(self) -> &'static str {
        use Instruction::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA", Xxx => "???",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub instruction: Instruction,
    pub mode: AddrMode,
    pub cycles: u8,
}

impl Opcode {
    pub fn is_documented(&self) -> bool {
        self.instruction != Instruction::Xxx
    }

    pub fn size(&self) -> u16 {
        self.mode.size()
    }
}

const fn op(instruction: Instruction, mode: AddrMode, cycles: u8) -> Opcode {
    Opcode {
        instruction,
        mode,
        cycles,
    }
}

use self::AddrMode::{
    Absolute as Abs, AbsoluteX as Abx, AbsoluteY as Aby, Accumulator as Acc, Immediate as Imm,
    Implied as Imp, IndexedIndirect as Izx, Indirect as Ind, IndirectIndexed as Izy,
    Relative as Rel, ZeroPage as Zp0, ZeroPageX as Zpx, ZeroPageY as Zpy,
};
use self::Instruction::*;

#[rustfmt::skip]
pub static OPCODES: [Opcode; 256] = [
    // $0x
    op(Brk, Imp, 7), op(Ora, Izx, 6), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Ora, Zp0, 3), op(Asl, Zp0, 5), op(Xxx, Imp, 2),
    op(Php, Imp, 3), op(Ora, Imm, 2), op(Asl, Acc, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Ora, Abs, 4), op(Asl, Abs, 6), op(Xxx, Imp, 2),
    // $1x
    op(Bpl, Rel, 2), op(Ora, Izy, 5), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Ora, Zpx, 4), op(Asl, Zpx, 6), op(Xxx, Imp, 2),
    op(Clc, Imp, 2), op(Ora, Aby, 4), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Ora, Abx, 4), op(Asl, Abx, 7), op(Xxx, Imp, 2),
    // $2x
    op(Jsr, Abs, 6), op(And, Izx, 6), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Bit, Zp0, 3), op(And, Zp0, 3), op(Rol, Zp0, 5), op(Xxx, Imp, 2),
    op(Plp, Imp, 4), op(And, Imm, 2), op(Rol, Acc, 2), op(Xxx, Imp, 2), op(Bit, Abs, 4), op(And, Abs, 4), op(Rol, Abs, 6), op(Xxx, Imp, 2),
    // $3x
    op(Bmi, Rel, 2), op(And, Izy, 5), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(And, Zpx, 4), op(Rol, Zpx, 6), op(Xxx, Imp, 2),
    op(Sec, Imp, 2), op(And, Aby, 4), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(And, Abx, 4), op(Rol, Abx, 7), op(Xxx, Imp, 2),
    // $4x
    op(Rti, Imp, 6), op(Eor, Izx, 6), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Eor, Zp0, 3), op(Lsr, Zp0, 5), op(Xxx, Imp, 2),
    op(Pha, Imp, 3), op(Eor, Imm, 2), op(Lsr, Acc, 2), op(Xxx, Imp, 2), op(Jmp, Abs, 3), op(Eor, Abs, 4), op(Lsr, Abs, 6), op(Xxx, Imp, 2),
    // $5x
    op(Bvc, Rel, 2), op(Eor, Izy, 5), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Eor, Zpx, 4), op(Lsr, Zpx, 6), op(Xxx, Imp, 2),
    op(Cli, Imp, 2), op(Eor, Aby, 4), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Eor, Abx, 4), op(Lsr, Abx, 7), op(Xxx, Imp, 2),
    // $6x
    op(Rts, Imp, 6), op(Adc, Izx, 6), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Adc, Zp0, 3), op(Ror, Zp0, 5), op(Xxx, Imp, 2),
    op(Pla, Imp, 4), op(Adc, Imm, 2), op(Ror, Acc, 2), op(Xxx, Imp, 2), op(Jmp, Ind, 5), op(Adc, Abs, 4), op(Ror, Abs, 6), op(Xxx, Imp, 2),
    // $7x
    op(Bvs, Rel, 2), op(Adc, Izy, 5), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Adc, Zpx, 4), op(Ror, Zpx, 6), op(Xxx, Imp, 2),
    op(Sei, Imp, 2), op(Adc, Aby, 4), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Adc, Abx, 4), op(Ror, Abx, 7), op(Xxx, Imp, 2),
    // $8x
    op(Xxx, Imp, 2), op(Sta, Izx, 6), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Sty, Zp0, 3), op(Sta, Zp0, 3), op(Stx, Zp0, 3), op(Xxx, Imp, 2),
    op(Dey, Imp, 2), op(Xxx, Imp, 2), op(Txa, Imp, 2), op(Xxx, Imp, 2), op(Sty, Abs, 4), op(Sta, Abs, 4), op(Stx, Abs, 4), op(Xxx, Imp, 2),
    // $9x
    op(Bcc, Rel, 2), op(Sta, Izy, 6), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Sty, Zpx, 4), op(Sta, Zpx, 4), op(Stx, Zpy, 4), op(Xxx, Imp, 2),
    op(Tya, Imp, 2), op(Sta, Aby, 5), op(Txs, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Sta, Abx, 5), op(Xxx, Imp, 2), op(Xxx, Imp, 2),
    // $Ax
    op(Ldy, Imm, 2), op(Lda, Izx, 6), op(Ldx, Imm, 2), op(Xxx, Imp, 2), op(Ldy, Zp0, 3), op(Lda, Zp0, 3), op(Ldx, Zp0, 3), op(Xxx, Imp, 2),
    op(Tay, Imp, 2), op(Lda, Imm, 2), op(Tax, Imp, 2), op(Xxx, Imp, 2), op(Ldy, Abs, 4), op(Lda, Abs, 4), op(Ldx, Abs, 4), op(Xxx, Imp, 2),
    // $Bx
    op(Bcs, Rel, 2), op(Lda, Izy, 5), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Ldy, Zpx, 4), op(Lda, Zpx, 4), op(Ldx, Zpy, 4), op(Xxx, Imp, 2),
    op(Clv, Imp, 2), op(Lda, Aby, 4), op(Tsx, Imp, 2), op(Xxx, Imp, 2), op(Ldy, Abx, 4), op(Lda, Abx, 4), op(Ldx, Aby, 4), op(Xxx, Imp, 2),
    // $Cx
    op(Cpy, Imm, 2), op(Cmp, Izx, 6), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Cpy, Zp0, 3), op(Cmp, Zp0, 3), op(Dec, Zp0, 5), op(Xxx, Imp, 2),
    op(Iny, Imp, 2), op(Cmp, Imm, 2), op(Dex, Imp, 2), op(Xxx, Imp, 2), op(Cpy, Abs, 4), op(Cmp, Abs, 4), op(Dec, Abs, 6), op(Xxx, Imp, 2),
    // $Dx
    op(Bne, Rel, 2), op(Cmp, Izy, 5), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Cmp, Zpx, 4), op(Dec, Zpx, 6), op(Xxx, Imp, 2),
    op(Cld, Imp, 2), op(Cmp, Aby, 4), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Cmp, Abx, 4), op(Dec, Abx, 7), op(Xxx, Imp, 2),
    // $Ex
    op(Cpx, Imm, 2), op(Sbc, Izx, 6), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Cpx, Zp0, 3), op(Sbc, Zp0, 3), op(Inc, Zp0, 5), op(Xxx, Imp, 2),
    op(Inx, Imp, 2), op(Sbc, Imm, 2), op(Nop, Imp, 2), op(Xxx, Imp, 2), op(Cpx, Abs, 4), op(Sbc, Abs, 4), op(Inc, Abs, 6), op(Xxx, Imp, 2),
    // $Fx
    op(Beq, Rel, 2), op(Sbc, Izy, 5), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Sbc, Zpx, 4), op(Inc, Zpx, 6), op(Xxx, Imp, 2),
    op(Sed, Imp, 2), op(Sbc, Aby, 4), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Xxx, Imp, 2), op(Sbc, Abx, 4), op(Inc, Abx, 7), op(Xxx, Imp, 2),
];
