use std::fmt;

use slog::{crit, debug, o, trace, Logger};

use crate::bus::Memory;

pub mod opcodes;

use self::opcodes::{AddrMode, Instruction, OPCODES};

pub const STACK_BASE: u16 = 0x0100;
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

const IRQ_CYCLES: u32 = 7;
const NMI_CYCLES: u32 = 8;

/// Bits of the status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Flag {
    Carry = 0x01,
    Zero = 0x02,
    InterruptDisable = 0x04,
    Decimal = 0x08,
    Break = 0x10,
    Unused = 0x20,
    Overflow = 0x40,
    Negative = 0x80,
}

impl Flag {
    pub fn mask(self) -> u8 {
        self as u8
    }
}

/// Returns `value` with the bits in `mask` set or cleared.
pub fn set_bit(value: u8, mask: u8, on: bool) -> u8 {
    if on {
        value | mask
    } else {
        value & !mask
    }
}

const POWER_ON_STATUS: u8 = 0b0010_0100;

/// A 6502 without decimal mode, as found in the 2A03.
///
/// The CPU does not own its memory; every operation that touches the address
/// space borrows it. Architectural state changes once per instruction, on the
/// cycle that fetches the opcode, and `remaining_cycles` then counts down the
/// rest of the instruction's duration.
#[derive(Debug)]
pub struct Cpu {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,

    remaining_cycles: u32,
    total_cycles: u64,
    operand_address: u16,
    relative_offset: i16,

    log: Logger,
}

impl Cpu {
    pub fn new(log: &Logger) -> Cpu {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFF,
            pc: 0,
            status: POWER_ON_STATUS,
            remaining_cycles: 0,
            total_cycles: 0,
            operand_address: 0,
            relative_offset: 0,
            log: log.new(o!("component" => "cpu")),
        }
    }

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn status(&self) -> u8 {
        self.status
    }

    pub fn flag(&self, flag: Flag) -> bool {
        self.status & flag.mask() != 0
    }

    /// Setting `Break` or clearing `Unused` has no effect on the live register.
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.status = status_from_stack(set_bit(self.status, flag.mask(), value));
    }

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// B never lives in the register and bit 5 always reads as 1, whatever
    /// `value` says about them.
    pub fn set_status(&mut self, value: u8) {
        self.status = status_from_stack(value);
    }

    /// Cycles left before the next opcode fetch.
    pub fn remaining_cycles(&self) -> u32 {
        self.remaining_cycles
    }

    /// Number of `clock` calls since construction.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    pub fn operand_address(&self) -> u16 {
        self.operand_address
    }

    pub fn relative_offset(&self) -> i16 {
        self.relative_offset
    }

    pub fn reset<M: Memory>(&mut self, bus: &M) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFF;
        self.status = POWER_ON_STATUS;
        self.pc = bus.read_word(RESET_VECTOR);
        self.remaining_cycles = 0;
        self.operand_address = 0;
        self.relative_offset = 0;
        debug!(self.log, "reset"; "pc" => format!("{:#06X}", self.pc));
    }

    /// Advances exactly one clock cycle.
    ///
    /// # Panics
    ///
    /// When the byte at PC is not a documented opcode.
    pub fn clock<M: Memory>(&mut self, bus: &mut M) {
        if self.remaining_cycles == 0 {
            let opcode = bus.read(self.pc);
            let entry = OPCODES[opcode as usize];
            if !entry.is_documented() {
                crit!(self.log, "unimplemented opcode";
                    "opcode" => format!("{:#04X}", opcode), "pc" => format!("{:#06X}", self.pc));
                panic!("unimplemented opcode ${:02X} at ${:04X}", opcode, self.pc);
            }
            trace!(self.log, "{}", entry.instruction.mnemonic();
                "pc" => format!("{:04X}", self.pc), "regs" => %self);

            self.pc = self.pc.wrapping_add(1);
            self.remaining_cycles = entry.cycles as u32;

            let page_crossed = self.resolve(entry.mode, bus);
            let reads_operand = self.execute(entry.instruction, entry.mode, bus);
            if page_crossed && reads_operand {
                self.remaining_cycles += 1;
            }
        }

        self.remaining_cycles -= 1;
        self.total_cycles += 1;
    }

    /// Clocks until the current instruction, or the next one when called on
    /// an instruction boundary, has used up all its cycles. Returns the number
    /// of cycles that took.
    pub fn step<M: Memory>(&mut self, bus: &mut M) -> u32 {
        let mut cycles = 0;
        loop {
            self.clock(bus);
            cycles += 1;
            if self.remaining_cycles == 0 {
                return cycles;
            }
        }
    }

    /// Maskable interrupt; ignored while the I flag is set.
    pub fn irq<M: Memory>(&mut self, bus: &mut M) {
        if self.flag(Flag::InterruptDisable) {
            debug!(self.log, "irq masked");
            return;
        }
        debug!(self.log, "irq"; "pc" => format!("{:#06X}", self.pc));
        self.interrupt(bus, IRQ_VECTOR, IRQ_CYCLES);
    }

    pub fn nmi<M: Memory>(&mut self, bus: &mut M) {
        debug!(self.log, "nmi"; "pc" => format!("{:#06X}", self.pc));
        self.interrupt(bus, NMI_VECTOR, NMI_CYCLES);
    }

    fn interrupt<M: Memory>(&mut self, bus: &mut M, vector: u16, cycles: u32) {
        self.push_word(bus, self.pc);
        let pushed = set_bit(self.status, Flag::Break.mask(), false) | Flag::Unused.mask();
        self.push(bus, pushed);
        self.set_flag(Flag::InterruptDisable, true);
        self.pc = bus.read_word(vector);
        self.remaining_cycles += cycles;
    }

    fn set_nz(&mut self, value: u8) {
        self.set_flag(Flag::Zero, value == 0);
        self.set_flag(Flag::Negative, value & 0x80 != 0);
    }

    fn next_byte<M: Memory>(&mut self, bus: &M) -> u8 {
        let value = bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn next_word<M: Memory>(&mut self, bus: &M) -> u16 {
        let value = bus.read_word(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    fn push<M: Memory>(&mut self, bus: &mut M, value: u8) {
        bus.write(STACK_BASE + self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pop<M: Memory>(&mut self, bus: &M) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE + self.sp as u16)
    }

    fn push_word<M: Memory>(&mut self, bus: &mut M, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, value as u8);
    }

    fn pop_word<M: Memory>(&mut self, bus: &M) -> u16 {
        let lo = self.pop(bus) as u16;
        let hi = self.pop(bus) as u16;
        (hi << 8) | lo
    }

    // Addressing modes. Each consumes its operand bytes, leaves the effective
    // address in `operand_address`, and reports whether indexing carried out
    // of the low byte.

    fn resolve<M: Memory>(&mut self, mode: AddrMode, bus: &M) -> bool {
        match mode {
            AddrMode::Implied | AddrMode::Accumulator => false,
            AddrMode::Immediate => {
                self.operand_address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                false
            }
            AddrMode::ZeroPage => {
                self.operand_address = self.next_byte(bus) as u16;
                false
            }
            AddrMode::ZeroPageX => {
                self.operand_address = self.next_byte(bus).wrapping_add(self.x) as u16;
                false
            }
            AddrMode::ZeroPageY => {
                self.operand_address = self.next_byte(bus).wrapping_add(self.y) as u16;
                false
            }
            AddrMode::Relative => {
                let offset = self.next_byte(bus);
                self.relative_offset = offset as i8 as i16;
                self.operand_address = self.pc.wrapping_add(self.relative_offset as u16);
                false
            }
            AddrMode::Absolute => {
                self.operand_address = self.next_word(bus);
                false
            }
            AddrMode::AbsoluteX => {
                let base = self.next_word(bus);
                self.index(base, self.x)
            }
            AddrMode::AbsoluteY => {
                let base = self.next_word(bus);
                self.index(base, self.y)
            }
            AddrMode::Indirect => {
                let pointer = self.next_word(bus);
                // The high byte never comes from the next page.
                let hi_address = if pointer & 0x00FF == 0x00FF {
                    pointer & 0xFF00
                } else {
                    pointer.wrapping_add(1)
                };
                let lo = bus.read(pointer) as u16;
                let hi = bus.read(hi_address) as u16;
                self.operand_address = (hi << 8) | lo;
                false
            }
            AddrMode::IndexedIndirect => {
                let pointer = self.next_byte(bus).wrapping_add(self.x);
                self.operand_address = zero_page_word(bus, pointer);
                false
            }
            AddrMode::IndirectIndexed => {
                let pointer = self.next_byte(bus);
                let base = zero_page_word(bus, pointer);
                self.index(base, self.y)
            }
        }
    }

    fn index(&mut self, base: u16, index: u8) -> bool {
        self.operand_address = base.wrapping_add(index as u16);
        (base & 0x00FF) + index as u16 > 0x00FF
    }

    fn operand<M: Memory>(&self, mode: AddrMode, bus: &M) -> u8 {
        match mode {
            AddrMode::Accumulator => self.a,
            _ => bus.read(self.operand_address),
        }
    }

    fn write_operand<M: Memory>(&mut self, mode: AddrMode, bus: &mut M, value: u8) {
        match mode {
            AddrMode::Accumulator => self.a = value,
            _ => bus.write(self.operand_address, value),
        }
    }

    /// Runs one instruction. Returns true for instructions that only read
    /// their operand; those pay for a page crossing during indexing.
    fn execute<M: Memory>(&mut self, instruction: Instruction, mode: AddrMode, bus: &mut M) -> bool {
        use self::Instruction::*;

        match instruction {
            Adc => {
                let value = self.operand(mode, bus);
                self.add_with_carry(value);
                true
            }
            Sbc => {
                let value = self.operand(mode, bus);
                self.add_with_carry(!value);
                true
            }
            And => {
                self.a &= self.operand(mode, bus);
                self.set_nz(self.a);
                true
            }
            Ora => {
                self.a |= self.operand(mode, bus);
                self.set_nz(self.a);
                true
            }
            Eor => {
                self.a ^= self.operand(mode, bus);
                self.set_nz(self.a);
                true
            }
            Bit => {
                let value = self.operand(mode, bus);
                self.set_flag(Flag::Zero, self.a & value == 0);
                self.set_flag(Flag::Negative, value & 0x80 != 0);
                self.set_flag(Flag::Overflow, value & 0x40 != 0);
                true
            }
            Cmp => {
                let value = self.operand(mode, bus);
                self.compare(self.a, value);
                true
            }
            Cpx => {
                let value = self.operand(mode, bus);
                self.compare(self.x, value);
                true
            }
            Cpy => {
                let value = self.operand(mode, bus);
                self.compare(self.y, value);
                true
            }
            Lda => {
                self.a = self.operand(mode, bus);
                self.set_nz(self.a);
                true
            }
            Ldx => {
                self.x = self.operand(mode, bus);
                self.set_nz(self.x);
                true
            }
            Ldy => {
                self.y = self.operand(mode, bus);
                self.set_nz(self.y);
                true
            }
            Sta => {
                bus.write(self.operand_address, self.a);
                false
            }
            Stx => {
                bus.write(self.operand_address, self.x);
                false
            }
            Sty => {
                bus.write(self.operand_address, self.y);
                false
            }

            Asl => {
                let value = self.operand(mode, bus);
                self.set_flag(Flag::Carry, value & 0x80 != 0);
                let result = value << 1;
                self.set_nz(result);
                self.write_operand(mode, bus, result);
                false
            }
            Lsr => {
                let value = self.operand(mode, bus);
                self.set_flag(Flag::Carry, value & 0x01 != 0);
                let result = value >> 1;
                self.set_flag(Flag::Zero, result == 0);
                self.set_flag(Flag::Negative, false);
                self.write_operand(mode, bus, result);
                false
            }
            Rol => {
                let value = self.operand(mode, bus);
                let carry_in = self.flag(Flag::Carry) as u8;
                self.set_flag(Flag::Carry, value & 0x80 != 0);
                let result = (value << 1) | carry_in;
                self.set_nz(result);
                self.write_operand(mode, bus, result);
                false
            }
            Ror => {
                let value = self.operand(mode, bus);
                let carry_in = self.flag(Flag::Carry) as u8;
                self.set_flag(Flag::Carry, value & 0x01 != 0);
                let result = (value >> 1) | (carry_in << 7);
                self.set_nz(result);
                self.write_operand(mode, bus, result);
                false
            }
            Inc => {
                let result = self.operand(mode, bus).wrapping_add(1);
                self.set_nz(result);
                self.write_operand(mode, bus, result);
                false
            }
            Dec => {
                let result = self.operand(mode, bus).wrapping_sub(1);
                self.set_nz(result);
                self.write_operand(mode, bus, result);
                false
            }
            Inx => {
                self.x = self.x.wrapping_add(1);
                self.set_nz(self.x);
                false
            }
            Iny => {
                self.y = self.y.wrapping_add(1);
                self.set_nz(self.y);
                false
            }
            Dex => {
                self.x = self.x.wrapping_sub(1);
                self.set_nz(self.x);
                false
            }
            Dey => {
                self.y = self.y.wrapping_sub(1);
                self.set_nz(self.y);
                false
            }

            Bcc => self.branch_if(!self.flag(Flag::Carry)),
            Bcs => self.branch_if(self.flag(Flag::Carry)),
            Bne => self.branch_if(!self.flag(Flag::Zero)),
            Beq => self.branch_if(self.flag(Flag::Zero)),
            Bpl => self.branch_if(!self.flag(Flag::Negative)),
            Bmi => self.branch_if(self.flag(Flag::Negative)),
            Bvc => self.branch_if(!self.flag(Flag::Overflow)),
            Bvs => self.branch_if(self.flag(Flag::Overflow)),

            Jmp => {
                self.pc = self.operand_address;
                false
            }
            Jsr => {
                self.push_word(bus, self.pc.wrapping_sub(1));
                self.pc = self.operand_address;
                false
            }
            Rts => {
                self.pc = self.pop_word(bus).wrapping_add(1);
                false
            }
            Brk => {
                // The byte after BRK is padding.
                self.pc = self.pc.wrapping_add(1);
                self.push_word(bus, self.pc);
                let pushed = self.status | Flag::Break.mask() | Flag::Unused.mask();
                self.push(bus, pushed);
                self.set_flag(Flag::InterruptDisable, true);
                self.pc = bus.read_word(IRQ_VECTOR);
                false
            }
            Rti => {
                let status = self.pop(bus);
                self.status = status_from_stack(status);
                self.pc = self.pop_word(bus);
                false
            }

            Pha => {
                self.push(bus, self.a);
                false
            }
            Php => {
                let pushed = self.status | Flag::Break.mask() | Flag::Unused.mask();
                self.push(bus, pushed);
                false
            }
            Pla => {
                self.a = self.pop(bus);
                self.set_nz(self.a);
                false
            }
            Plp => {
                let status = self.pop(bus);
                self.status = status_from_stack(status);
                false
            }

            Clc => self.assign_flag(Flag::Carry, false),
            Sec => self.assign_flag(Flag::Carry, true),
            Cld => self.assign_flag(Flag::Decimal, false),
            Sed => self.assign_flag(Flag::Decimal, true),
            Cli => self.assign_flag(Flag::InterruptDisable, false),
            Sei => self.assign_flag(Flag::InterruptDisable, true),
            Clv => self.assign_flag(Flag::Overflow, false),

            Tax => {
                self.x = self.a;
                self.set_nz(self.x);
                false
            }
            Tay => {
                self.y = self.a;
                self.set_nz(self.y);
                false
            }
            Txa => {
                self.a = self.x;
                self.set_nz(self.a);
                false
            }
            Tya => {
                self.a = self.y;
                self.set_nz(self.a);
                false
            }
            Tsx => {
                self.x = self.sp;
                self.set_nz(self.x);
                false
            }
            Txs => {
                self.sp = self.x;
                false
            }

            Nop => false,
            Xxx => unreachable!("undocumented opcodes are rejected at fetch"),
        }
    }

    fn assign_flag(&mut self, flag: Flag, value: bool) -> bool {
        self.set_flag(flag, value);
        false
    }

    fn add_with_carry(&mut self, value: u8) {
        let sum = self.a as u16 + value as u16 + self.flag(Flag::Carry) as u16;
        let result = sum as u8;
        self.set_flag(Flag::Carry, sum > 0xFF);
        self.set_flag(Flag::Overflow, !(self.a ^ value) & (self.a ^ result) & 0x80 != 0);
        self.a = result;
        self.set_nz(result);
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.set_flag(Flag::Carry, register >= value);
        self.set_nz(register.wrapping_sub(value));
    }

    // Taken branches cost one cycle, two when the target is on another page.
    fn branch_if(&mut self, condition: bool) -> bool {
        if condition {
            self.remaining_cycles += 1;
            let target = self.pc.wrapping_add(self.relative_offset as u16);
            if target & 0xFF00 != self.pc & 0xFF00 {
                self.remaining_cycles += 1;
            }
            self.pc = target;
        }
        false
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PC:{:04X}",
            self.a, self.x, self.y, self.status, self.sp, self.pc
        )
    }
}

fn status_from_stack(value: u8) -> u8 {
    set_bit(value, Flag::Break.mask(), false) | Flag::Unused.mask()
}

// Pointers stored in zero page wrap around within it.
fn zero_page_word<M: Memory>(bus: &M, pointer: u8) -> u16 {
    let lo = bus.read(pointer as u16) as u16;
    let hi = bus.read(pointer.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}
