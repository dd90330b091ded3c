//! A 6502 core with the NES CPU memory map and NROM cartridges.
//!
//! The host owns one [`Bus`] and one [`Cpu`] and drives them with
//! [`Cpu::clock`]:
//!
//! ```no_run
//! use nesdb::{create_bus, Cpu};
//! use slog::{o, Discard, Logger};
//!
//! let log = Logger::root(Discard, o!());
//! let mut bus = create_bus("game.nes", &log).unwrap();
//! let mut cpu = Cpu::new(&log);
//! cpu.reset(&bus);
//! for _ in 0..100 {
//!     cpu.clock(&mut bus);
//! }
//! ```

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod disassembler;
pub mod error;
pub mod ines;
pub mod nrom_mapper;

pub use crate::bus::{create_bus, Bus, Memory};
pub use crate::cartridge::{Cartridge, Mirroring};
pub use crate::cpu::{Cpu, Flag};
pub use crate::disassembler::{disassemble_one, disassemble_range};
pub use crate::error::RomError;
