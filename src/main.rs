use anyhow::Context;
use gumdrop::Options;
use slog::{info, o, Drain, Level, Logger};

use nesdb::{create_bus, disassemble_one, Cpu, Memory};

#[derive(Debug, Options)]
struct RunOptions {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, required, help = "the name of the ROM to execute")]
    rom_path: String,

    #[options(help = "number of instructions to execute", default = "100")]
    steps: u64,

    #[options(help = "log each instruction before it executes")]
    trace: bool,

    #[options(help = "raise an NMI every N cycles (0 disables)", meta = "N")]
    nmi_every: u64,

    #[options(help = "dump 16 bytes of memory at this hex address when done",
              parse(try_from_str = "parse_hex"), meta = "ADDR")]
    dump: Option<u16>,

    #[options(help = "include debug records in the log")]
    verbose: bool,
}

fn parse_hex(s: &str) -> Result<u16, std::num::ParseIntError> {
    let digits = s.trim_start_matches("0x").trim_start_matches('$');
    u16::from_str_radix(digits, 16)
}

fn build_logger(verbose: bool) -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let level = if verbose { Level::Debug } else { Level::Info };
    Logger::root(drain.filter_level(level).fuse(), o!())
}

fn main() -> anyhow::Result<()> {
    let opts = RunOptions::parse_args_default_or_exit();
    let log = build_logger(opts.verbose);

    let mut bus = create_bus(&opts.rom_path, &log)
        .with_context(|| format!("could not load {}", opts.rom_path))?;
    let mut cpu = Cpu::new(&log);
    cpu.reset(&bus);

    let mut next_nmi = opts.nmi_every;
    for _ in 0..opts.steps {
        if opts.trace {
            let (text, _) = disassemble_one(&bus, cpu.pc());
            info!(log, "{:04X}  {:<14}{}", cpu.pc(), text, cpu);
        }
        cpu.step(&mut bus);

        if opts.nmi_every > 0 && cpu.total_cycles() >= next_nmi {
            cpu.nmi(&mut bus);
            next_nmi += opts.nmi_every;
        }
    }

    info!(log, "stopped"; "cpu" => %cpu, "cycles" => cpu.total_cycles());

    if let Some(addr) = opts.dump {
        let bytes: Vec<String> = (0..16u16)
            .map(|i| format!("{:02X}", bus.read(addr.wrapping_add(i))))
            .collect();
        info!(log, "memory"; "addr" => format!("{:04X}", addr), "bytes" => bytes.join(" "));
    }

    Ok(())
}
