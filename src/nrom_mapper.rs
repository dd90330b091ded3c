use std::fmt;

use crate::error::RomError;
use crate::ines::PRG_ROM_UNIT;

/// Address translation between the console buses and cartridge storage.
///
/// A mapper never touches memory itself: it turns a CPU or PPU address into
/// an offset into PRG or CHR storage, or `None` when the board leaves that
/// address unconnected.
pub trait Mapper: fmt::Debug {
    fn number(&self) -> u8;
    fn name(&self) -> &'static str;
    /// Offset into PRG-ROM for a CPU address.
    fn map_cpu_address(&self, addr: u16) -> Option<usize>;
    /// Offset into CHR memory for a PPU address.
    fn map_ppu_address(&self, addr: u16) -> Option<usize>;
    /// Whether CPU writes into the PRG-ROM window land in PRG storage.
    fn prg_writable(&self) -> bool {
        false
    }
}

/// Mapper 0. No bank switching; a 16 KB PRG-ROM appears twice in
/// $8000-$FFFF, a 32 KB one fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nrom {
    mirror_prg: bool,
}

impl Nrom {
    pub fn new(prg_rom_size: usize) -> Result<Nrom, RomError> {
        match prg_rom_size {
            s if s == PRG_ROM_UNIT => Ok(Nrom { mirror_prg: true }),
            s if s == 2 * PRG_ROM_UNIT => Ok(Nrom { mirror_prg: false }),
            size => Err(RomError::InvalidPrgSize { mapper: 0, size }),
        }
    }

    pub fn mirrors_prg(&self) -> bool {
        self.mirror_prg
    }
}

impl Mapper for Nrom {
    fn number(&self) -> u8 {
        0
    }

    fn name(&self) -> &'static str {
        "NROM"
    }

    fn map_cpu_address(&self, addr: u16) -> Option<usize> {
        if addr < 0x8000 {
            return None;
        }
        let offset = (addr - 0x8000) as usize;
        if self.mirror_prg {
            Some(offset & 0x3FFF)
        } else {
            Some(offset)
        }
    }

    fn map_ppu_address(&self, addr: u16) -> Option<usize> {
        if addr < 0x2000 {
            Some(addr as usize)
        } else {
            None
        }
    }
}

/// Picks the mapper for a header's mapper number. Unknown numbers fail here,
/// never later during translation.
pub fn create_mapper(number: u8, prg_rom_size: usize) -> Result<Box<dyn Mapper>, RomError> {
    match number {
        0 => Ok(Box::new(Nrom::new(prg_rom_size)?)),
        n => Err(RomError::UnsupportedMapper(n)),
    }
}
