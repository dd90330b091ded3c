use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while turning an iNES image into a cartridge.
///
/// Only `Read` is an I/O failure; every other variant means the image was
/// read fine but describes something this emulator refuses to run.
#[derive(Debug)]
pub enum RomError {
    Read { path: PathBuf, source: io::Error },
    TruncatedHeader { len: usize },
    Nes2,
    VsUnisystem,
    UnsupportedMapper(u8),
    InvalidPrgSize { mapper: u8, size: usize },
    SizeMismatch { region: &'static str, expected: usize, actual: usize },
}

impl RomError {
    pub fn is_unsupported(&self) -> bool {
        match self {
            RomError::Read { .. } => false,
            _ => true,
        }
    }
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RomError::Read { path, source } => {
                write!(f, "could not read ROM {}: {}", path.display(), source)
            }
            RomError::TruncatedHeader { len } => {
                write!(f, "file is {} bytes, too short for a 16 byte iNES header", len)
            }
            RomError::Nes2 => write!(f, "NES 2.0 ROMs are not supported"),
            RomError::VsUnisystem => write!(f, "ROM is for the VS Unisystem"),
            RomError::UnsupportedMapper(n) => write!(f, "unsupported mapper: {}", n),
            RomError::InvalidPrgSize { mapper, size } => {
                write!(f, "invalid PRG ROM size {} for mapper {}", size, mapper)
            }
            RomError::SizeMismatch { region, expected, actual } => write!(
                f,
                "header specified {} ROM size of {} but only {} bytes read",
                region, expected, actual
            ),
        }
    }
}

impl Error for RomError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RomError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}
