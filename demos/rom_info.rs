use gumdrop::Options;
use nesdb::cpu::RESET_VECTOR;
use nesdb::{disassemble_range, Bus, Cartridge, Memory};
use slog::{o, Discard, Logger};

#[derive(Debug, Options)]
struct InfoOptions {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, required, help = "the name of the ROM to inspect")]
    rom_path: String,

    #[options(help = "instructions to disassemble from the reset vector", default = "8")]
    count: usize,
}

fn main() -> Result<(), nesdb::RomError> {
    let opts = InfoOptions::parse_args_default_or_exit();

    println!("opening rom {}", opts.rom_path);
    let cartridge = Cartridge::load(&opts.rom_path)?;

    println!("mapper:      {} ({})", cartridge.mapper_number(), cartridge.mapper().name());
    println!("PRG-ROM:     {} bytes", cartridge.prg_rom_size());
    if cartridge.has_chr_ram() {
        println!("CHR-RAM:     8192 bytes");
    } else {
        println!("CHR-ROM:     {} bytes", cartridge.chr_rom_size());
    }
    println!("mirroring:   {:?}", cartridge.mirroring());
    println!("battery:     {}", cartridge.has_battery_ram());
    println!("trainer:     {}", cartridge.has_trainer());

    let bus = Bus::new(cartridge, &Logger::root(Discard, o!()));
    let reset_vector = bus.read_word(RESET_VECTOR);
    println!("reset vector: {:#06X}", reset_vector);

    for (addr, text, _) in disassemble_range(&bus, reset_vector, opts.count) {
        println!("  {:04X}  {}", addr, text);
    }

    Ok(())
}
