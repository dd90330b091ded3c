use std::path::Path;

use crate::error::RomError;
use crate::ines::{INesHeader, NesRom};
use crate::nrom_mapper::{create_mapper, Mapper};

pub const PRG_RAM_SIZE: usize = 8 * 1024;
pub const CHR_RAM_SIZE: usize = 8 * 1024;
const PRG_RAM_START: u16 = 0x6000;
const TRAINER_START: usize = 0x7000 - PRG_RAM_START as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// PRG and CHR storage behind a mapper.
///
/// Built once from an iNES image; after that only the writable parts
/// (PRG-RAM, CHR-RAM, and PRG-ROM when the mapper allows it) change.
#[derive(Debug)]
pub struct Cartridge {
    header: INesHeader,
    prg_rom: Vec<u8>,
    chr: Vec<u8>,
    chr_is_ram: bool,
    prg_ram: Option<Vec<u8>>,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Cartridge, RomError> {
        Cartridge::from_rom(NesRom::from_file(path)?)
    }

    pub fn from_bytes(contents: &[u8]) -> Result<Cartridge, RomError> {
        Cartridge::from_rom(NesRom::from_bytes(contents)?)
    }

    pub fn from_rom(rom: NesRom) -> Result<Cartridge, RomError> {
        let mapper = create_mapper(rom.mapper_number(), rom.prg_rom_size_bytes())?;
        let (header, trainer, prg_rom, chr_rom) = rom.into_parts();

        let chr_is_ram = chr_rom.is_empty();
        let chr = if chr_is_ram {
            vec![0; CHR_RAM_SIZE]
        } else {
            chr_rom
        };

        let prg_ram = if header.has_persistent_memory() || trainer.is_some() {
            let mut ram = vec![0; PRG_RAM_SIZE];
            if let Some(trainer) = trainer {
                ram[TRAINER_START..TRAINER_START + trainer.len()].copy_from_slice(&trainer);
            }
            Some(ram)
        } else {
            None
        };

        Ok(Cartridge {
            header,
            prg_rom,
            chr,
            chr_is_ram,
            prg_ram,
            mapper,
        })
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn mapper_number(&self) -> u8 {
        self.header.mapper_number()
    }

    pub fn prg_rom_size(&self) -> usize {
        self.prg_rom.len()
    }

    /// Size of CHR-ROM as declared by the header; 0 when the board has CHR-RAM.
    pub fn chr_rom_size(&self) -> usize {
        self.header.chr_rom_size_bytes()
    }

    pub fn has_chr_ram(&self) -> bool {
        self.chr_is_ram
    }

    pub fn has_prg_ram(&self) -> bool {
        self.prg_ram.is_some()
    }

    pub fn has_battery_ram(&self) -> bool {
        self.header.has_persistent_memory()
    }

    pub fn has_trainer(&self) -> bool {
        self.header.has_trainer()
    }

    pub fn has_valid_magic(&self) -> bool {
        self.header.has_valid_magic()
    }

    pub fn mirroring(&self) -> Mirroring {
        if self.header.four_screen_vram() {
            Mirroring::FourScreen
        } else if self.header.mirrored_vertical() {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    /// CPU read in $4020-$FFFF. Unconnected addresses read as 0.
    pub fn cpu_read(&self, addr: u16) -> u8 {
        if let Some(offset) = self.mapper.map_cpu_address(addr) {
            return self.prg_rom.get(offset).copied().unwrap_or(0);
        }
        match (self.prg_ram.as_ref(), prg_ram_offset(addr)) {
            (Some(ram), Some(offset)) => ram[offset],
            _ => 0,
        }
    }

    pub fn cpu_write(&mut self, addr: u16, value: u8) {
        if let Some(offset) = self.mapper.map_cpu_address(addr) {
            if self.mapper.prg_writable() {
                if let Some(byte) = self.prg_rom.get_mut(offset) {
                    *byte = value;
                }
            }
            return;
        }
        if let (Some(ram), Some(offset)) = (self.prg_ram.as_mut(), prg_ram_offset(addr)) {
            ram[offset] = value;
        }
    }

    pub fn ppu_read(&self, addr: u16) -> u8 {
        self.mapper
            .map_ppu_address(addr)
            .and_then(|offset| self.chr.get(offset).copied())
            .unwrap_or(0)
    }

    /// Lands only on CHR-RAM; CHR-ROM ignores writes.
    pub fn ppu_write(&mut self, addr: u16, value: u8) {
        if !self.chr_is_ram {
            return;
        }
        if let Some(offset) = self.mapper.map_ppu_address(addr) {
            if let Some(byte) = self.chr.get_mut(offset) {
                *byte = value;
            }
        }
    }
}

fn prg_ram_offset(addr: u16) -> Option<usize> {
    match addr {
        0x6000..=0x7FFF => Some((addr - PRG_RAM_START) as usize),
        _ => None,
    }
}
