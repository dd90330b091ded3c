use std::path::Path;

use slog::{info, o, trace, warn, Logger};

use crate::cartridge::Cartridge;
use crate::error::RomError;

pub const RAM_SIZE: usize = 2 * 1024;

/// The CPU-visible 16-bit address space.
pub trait Memory {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read; the high byte comes from `addr + 1`,
    /// wrapping at $FFFF.
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// Routes CPU accesses to internal RAM, the cartridge, or the inert PPU and
/// APU register windows.
///
/// | range         | target                          |
/// |---------------|---------------------------------|
/// | $0000-$1FFF   | 2 KB RAM, mirrored every $0800   |
/// | $2000-$3FFF   | PPU registers (reads 0)          |
/// | $4000-$4017   | APU and I/O registers (reads 0)  |
/// | $4018-$401F   | disabled test registers (reads 0)|
/// | $4020-$FFFF   | cartridge                        |
pub struct Bus {
    ram: [u8; RAM_SIZE],
    cartridge: Cartridge,
    log: Logger,
}

impl Bus {
    pub fn new(cartridge: Cartridge, log: &Logger) -> Bus {
        Bus {
            ram: [0; RAM_SIZE],
            cartridge,
            log: log.new(o!("component" => "bus")),
        }
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }

    pub fn cartridge_mut(&mut self) -> &mut Cartridge {
        &mut self.cartridge
    }
}

impl Memory for Bus {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x2000..=0x3FFF => 0,
            0x4000..=0x4017 => 0,
            0x4018..=0x401F => 0,
            0x4020..=0xFFFF => self.cartridge.cpu_read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize] = value,
            0x2000..=0x3FFF => {
                trace!(self.log, "ignored PPU register write";
                    "addr" => format!("{:#06X}", addr), "value" => value);
            }
            0x4000..=0x4017 => {
                trace!(self.log, "ignored APU/IO register write";
                    "addr" => format!("{:#06X}", addr), "value" => value);
            }
            0x4018..=0x401F => {
                trace!(self.log, "ignored test register write";
                    "addr" => format!("{:#06X}", addr), "value" => value);
            }
            0x4020..=0xFFFF => self.cartridge.cpu_write(addr, value),
        }
    }
}

/// Loads the ROM at `rom_path` and plugs it into a fresh bus.
pub fn create_bus<P: AsRef<Path>>(rom_path: P, log: &Logger) -> Result<Bus, RomError> {
    let rom_path = rom_path.as_ref();
    let cartridge = Cartridge::load(rom_path)?;

    if !cartridge.has_valid_magic() {
        warn!(log, "ROM header is missing the iNES magic"; "path" => %rom_path.display());
    }
    info!(log, "cartridge loaded";
        "path" => %rom_path.display(),
        "mapper" => cartridge.mapper_number(),
        "mapper_name" => cartridge.mapper().name(),
        "prg_rom" => cartridge.prg_rom_size(),
        "chr_rom" => cartridge.chr_rom_size(),
        "mirroring" => ?cartridge.mirroring(),
        "battery" => cartridge.has_battery_ram(),
        "trainer" => cartridge.has_trainer());

    Ok(Bus::new(cartridge, log))
}
