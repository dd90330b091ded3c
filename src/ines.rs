use std::fs::read;
use std::path::Path;

use crate::error::RomError;

pub const HEADER_SIZE: usize = 16;
pub const TRAINER_SIZE: usize = 512;
pub const PRG_ROM_UNIT: usize = 16 * 1024;
pub const CHR_ROM_UNIT: usize = 8 * 1024;

const MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// An iNES image split into its parts. The PRG and CHR payloads always have
/// exactly the sizes the header declares.
#[derive(Debug)]
pub struct NesRom {
    header: INesHeader,
    trainer: Option<Vec<u8>>,
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
}

impl NesRom {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<NesRom, RomError> {
        let path = path.as_ref();
        let contents = read(path).map_err(|source| RomError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        NesRom::from_bytes(&contents)
    }

    pub fn from_bytes(contents: &[u8]) -> Result<NesRom, RomError> {
        let header = INesHeader::from_bytes(contents)?;
        let mut ptr = HEADER_SIZE;

        let trainer = if header.has_trainer() {
            let trainer = copy_region(contents, ptr, TRAINER_SIZE, "trainer")?;
            ptr += TRAINER_SIZE;
            Some(trainer)
        } else {
            None
        };

        let prg_rom = copy_region(contents, ptr, header.prg_rom_size_bytes(), "PRG")?;
        ptr += header.prg_rom_size_bytes();

        let chr_rom = copy_region(contents, ptr, header.chr_rom_size_bytes(), "CHR")?;

        Ok(NesRom {
            header,
            trainer,
            prg_rom,
            chr_rom,
        })
    }

    pub fn header(&self) -> &INesHeader {
        &self.header
    }

    pub fn trainer(&self) -> Option<&[u8]> {
        self.trainer.as_deref()
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn mapper_number(&self) -> u8 {
        self.header.mapper_number()
    }

    pub fn prg_rom_size_bytes(&self) -> usize {
        self.header.prg_rom_size_bytes()
    }

    pub(crate) fn into_parts(self) -> (INesHeader, Option<Vec<u8>>, Vec<u8>, Vec<u8>) {
        (self.header, self.trainer, self.prg_rom, self.chr_rom)
    }
}

// Copies `len` bytes starting at `start`, failing if the file ends early.
fn copy_region(
    contents: &[u8],
    start: usize,
    len: usize,
    region: &'static str,
) -> Result<Vec<u8>, RomError> {
    let available = contents.len().saturating_sub(start).min(len);
    if available != len {
        return Err(RomError::SizeMismatch {
            region,
            expected: len,
            actual: available,
        });
    }
    Ok(contents[start..start + len].to_vec())
}

#[derive(Debug, Clone)]
pub struct INesHeader {
    magic: [u8; 4],
    prg_size: u8,
    chr_size: u8,
    flags_6: u8,
    flags_7: u8,
}

impl INesHeader {
    pub fn from_bytes(input: &[u8]) -> Result<INesHeader, RomError> {
        if input.len() < HEADER_SIZE {
            return Err(RomError::TruncatedHeader { len: input.len() });
        }

        let result = INesHeader {
            magic: [input[0], input[1], input[2], input[3]],
            prg_size: input[4],
            chr_size: input[5],
            flags_6: input[6],
            flags_7: input[7],
        };

        if result.vs_unisystem() {
            return Err(RomError::VsUnisystem);
        }
        if result.is_ines_2() {
            return Err(RomError::Nes2);
        }
        Ok(result)
    }

    /// The magic is reported rather than enforced; plenty of dumps in the
    /// wild carry junk there.
    pub fn has_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn prg_rom_size_bytes(&self) -> usize {
        self.prg_size as usize * PRG_ROM_UNIT
    }

    pub fn chr_rom_size_bytes(&self) -> usize {
        self.chr_size as usize * CHR_ROM_UNIT
    }

    pub fn mirrored_vertical(&self) -> bool {
        (self.flags_6 & 0x01) != 0
    }

    pub fn has_persistent_memory(&self) -> bool {
        (self.flags_6 & 0x02) != 0
    }

    pub fn has_trainer(&self) -> bool {
        (self.flags_6 & 0x04) != 0
    }

    pub fn four_screen_vram(&self) -> bool {
        (self.flags_6 & 0x08) != 0
    }

    pub fn vs_unisystem(&self) -> bool {
        (self.flags_7 & 0x01) != 0
    }

    pub fn is_ines_2(&self) -> bool {
        (self.flags_7 & 0x0C) == 0x08
    }

    pub fn mapper_number(&self) -> u8 {
        (self.flags_6 >> 4) | (self.flags_7 & 0xF0)
    }
}
