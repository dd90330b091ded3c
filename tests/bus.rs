mod common;

use std::sync::{Arc, Mutex};

use common::{logger, RomImage};
use nesdb::{create_bus, Bus, Memory, RomError};
use slog::{o, Drain, Logger, Never, OwnedKVList, Record};

/// Collects log messages so tests can check what the bus reported.
struct Messages(Arc<Mutex<Vec<String>>>);

impl Drain for Messages {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record, _: &OwnedKVList) -> Result<(), Never> {
        self.0.lock().unwrap().push(record.msg().to_string());
        Ok(())
    }
}

#[test]
fn ram_is_mirrored_every_2k() {
    let mut bus = RomImage::nrom(1, 1).bus();
    for addr in 0..0x0800u16 {
        bus.write(addr, (addr ^ (addr >> 8)) as u8);
    }
    for addr in 0..0x2000u16 {
        assert_eq!(bus.read(addr), bus.read(addr & 0x07FF), "at {:#06X}", addr);
    }
}

#[test]
fn writes_are_visible_at_all_four_mirrors() {
    let mut bus = RomImage::nrom(1, 1).bus();
    bus.write(0x1A34, 0x5C);
    for base in &[0x0000u16, 0x0800, 0x1000, 0x1800] {
        assert_eq!(bus.read(base + 0x0234), 0x5C);
    }
}

#[test]
fn io_windows_are_inert() {
    let mut bus = RomImage::nrom(1, 1).bus();
    for &addr in &[0x2000u16, 0x2002, 0x3FFF, 0x4000, 0x4016, 0x4017, 0x4018, 0x401F] {
        bus.write(addr, 0xFF);
        assert_eq!(bus.read(addr), 0, "at {:#06X}", addr);
    }
    // Nothing leaked into RAM.
    assert!((0..0x0800u16).all(|a| bus.read(a) == 0));
}

#[test]
fn ignored_writes_are_logged_in_every_io_window() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let log = Logger::root(Messages(messages.clone()), o!());
    let mut bus = Bus::new(RomImage::nrom(1, 1).cartridge(), &log);

    bus.write(0x2001, 0x1E);
    bus.write(0x4016, 0x01);
    bus.write(0x401A, 0x00);
    bus.write(0x0000, 0x00);

    let messages = messages.lock().unwrap();
    assert_eq!(
        *messages,
        vec![
            "ignored PPU register write".to_string(),
            "ignored APU/IO register write".to_string(),
            "ignored test register write".to_string(),
        ]
    );
}

#[test]
fn read_word_is_little_endian() {
    let mut bus = RomImage::nrom(1, 1).with_vector(0xFFFC, 0xC123).bus();
    assert_eq!(bus.read_word(0xFFFC), 0xC123);
    bus.write(0x07FF, 0x34);
    bus.write(0x0800, 0x12);
    assert_eq!(bus.read_word(0x07FF), 0x1234);
}

#[test]
fn create_bus_loads_the_rom() {
    let path = RomImage::nrom(1, 1)
        .with_code(0x8000, &[0xEA])
        .write_temp("create_bus_loads_the_rom");
    let bus = create_bus(&path, &logger()).unwrap();
    assert_eq!(bus.read(0x8000), 0xEA);
    assert_eq!(bus.read(0xC000), 0xEA);
}

#[test]
fn create_bus_reports_load_failures() {
    match create_bus("/no/such/rom.nes", &logger()) {
        Err(RomError::Read { path, .. }) => assert!(path.ends_with("rom.nes")),
        Err(other) => panic!("wrong error: {}", other),
        Ok(_) => panic!("loaded a missing file"),
    }
}
