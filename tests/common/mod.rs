#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use nesdb::{Bus, Cartridge, Cpu, Memory};
use slog::{o, Discard, Logger};

pub fn logger() -> Logger {
    Logger::root(Discard, o!())
}

/// An iNES image assembled in memory.
pub struct RomImage {
    pub prg: Vec<u8>,
    pub chr: Vec<u8>,
    pub flags_6: u8,
    pub flags_7: u8,
    pub trainer: Option<Vec<u8>>,
}

impl RomImage {
    pub fn nrom(prg_banks: usize, chr_banks: usize) -> RomImage {
        RomImage {
            prg: vec![0; prg_banks * 16 * 1024],
            chr: vec![0; chr_banks * 8 * 1024],
            flags_6: 0,
            flags_7: 0,
            trainer: None,
        }
    }

    /// Places `bytes` at CPU address `addr` (in $8000-$FFFF).
    pub fn with_code(mut self, addr: u16, bytes: &[u8]) -> RomImage {
        for (i, b) in bytes.iter().enumerate() {
            let offset = (addr as usize - 0x8000 + i) % self.prg.len();
            self.prg[offset] = *b;
        }
        self
    }

    pub fn with_vector(self, vector: u16, target: u16) -> RomImage {
        self.with_code(vector, &[target as u8, (target >> 8) as u8])
    }

    pub fn with_flags(mut self, flags_6: u8, flags_7: u8) -> RomImage {
        self.flags_6 = flags_6;
        self.flags_7 = flags_7;
        self
    }

    pub fn with_trainer(mut self, trainer: Vec<u8>) -> RomImage {
        self.flags_6 |= 0x04;
        self.trainer = Some(trainer);
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![
            0x4E,
            0x45,
            0x53,
            0x1A,
            (self.prg.len() / (16 * 1024)) as u8,
            (self.chr.len() / (8 * 1024)) as u8,
            self.flags_6,
            self.flags_7,
        ];
        bytes.resize(16, 0);
        if let Some(trainer) = &self.trainer {
            bytes.extend_from_slice(trainer);
        }
        bytes.extend_from_slice(&self.prg);
        bytes.extend_from_slice(&self.chr);
        bytes
    }

    pub fn cartridge(&self) -> Cartridge {
        Cartridge::from_bytes(&self.to_bytes()).unwrap()
    }

    pub fn bus(&self) -> Bus {
        Bus::new(self.cartridge(), &logger())
    }

    pub fn write_temp(&self, name: &str) -> PathBuf {
        temp_file(name, &self.to_bytes())
    }
}

pub fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("nesdb-{}-{}.nes", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

/// 64 KB of plain RAM, for driving the CPU without the NES memory map.
pub struct FlatMemory {
    pub bytes: Vec<u8>,
}

impl FlatMemory {
    pub fn new() -> FlatMemory {
        FlatMemory {
            bytes: vec![0; 0x10000],
        }
    }

    /// Loads `program` at `origin` and points the reset vector at it.
    pub fn with_program(origin: u16, program: &[u8]) -> FlatMemory {
        let mut mem = FlatMemory::new();
        mem.load(origin, program);
        mem.set_word(0xFFFC, origin);
        mem
    }

    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            self.bytes[addr as usize + i] = *b;
        }
    }

    pub fn set_word(&mut self, addr: u16, value: u16) {
        self.bytes[addr as usize] = value as u8;
        self.bytes[addr as usize + 1] = (value >> 8) as u8;
    }
}

impl Memory for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.bytes[addr as usize] = value;
    }
}

/// A freshly reset CPU.
pub fn boot<M: Memory>(mem: &M) -> Cpu {
    let mut cpu = Cpu::new(&logger());
    cpu.reset(mem);
    cpu
}

/// Loads `program` at $8000 in flat memory and boots a CPU on it.
pub fn run_program(program: &[u8], instructions: usize) -> (Cpu, FlatMemory) {
    let mut mem = FlatMemory::with_program(0x8000, program);
    let mut cpu = boot(&mem);
    for _ in 0..instructions {
        cpu.step(&mut mem);
    }
    (cpu, mem)
}
