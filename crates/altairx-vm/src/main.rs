//! CLI entry point for the AltairX virtual machine.

mod syscall;

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use altairx_core::memory::{ROM_BEGIN, WRAM_BEGIN};
use altairx_core::{Core, Memory};

const HELP_TEXT: &str =
    "Usage: altairx <program> [--kernel <file>] [--wram <KiB>] [--report] [--help]";

/// Entry word index of a raw program: the image starts with a 16-byte
/// header, so execution begins at word 4.
const RAW_ENTRY_PC: u32 = 4;

const DEFAULT_WRAM_KIB: usize = 8 * 1024;
const DEFAULT_SPM_KIB: usize = 16;

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    program: PathBuf,
    kernel: Option<PathBuf>,
    wram_kib: usize,
    report: bool,
}

#[derive(Debug)]
enum ParseResult {
    Args(CliArgs),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut program: Option<PathBuf> = None;
    let mut kernel: Option<PathBuf> = None;
    let mut wram_kib = DEFAULT_WRAM_KIB;
    let mut report = false;

    while let Some(arg) = args.next() {
        if arg == "--help" {
            return Ok(ParseResult::Help);
        }

        if arg == "--report" {
            report = true;
            continue;
        }

        if arg == "--kernel" {
            let value = args
                .next()
                .ok_or_else(|| String::from("missing value for --kernel"))?;
            kernel = Some(PathBuf::from(value));
            continue;
        }

        if arg == "--wram" {
            let value = args
                .next()
                .ok_or_else(|| String::from("missing value for --wram"))?;
            wram_kib = value
                .to_string_lossy()
                .parse()
                .map_err(|_| String::from("--wram expects a size in KiB"))?;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if program.is_some() {
            return Err(String::from("multiple program paths provided"));
        }
        program = Some(PathBuf::from(arg));
    }

    let program = program.ok_or_else(|| String::from("missing program path"))?;
    Ok(ParseResult::Args(CliArgs {
        program,
        kernel,
        wram_kib,
        report,
    }))
}

/// Copies a raw image file into guest memory at a region base.
fn load_image(core: &mut Core, base: u64, path: &Path) -> Result<(), String> {
    let image =
        std::fs::read(path).map_err(|error| format!("cannot open {}: {error}", path.display()))?;
    let target = core
        .memory_mut()
        .slice_mut(base, image.len())
        .map_err(|error| format!("{} does not fit: {error}", path.display()))?;
    target.copy_from_slice(&image);
    Ok(())
}

fn run(core: &mut Core, report: bool) -> i32 {
    const CHECK_INTERVAL: u64 = 1 << 20;

    let mut window_start = Instant::now();
    let mut window_cycles = 0u64;
    let mut counter = 0u64;

    while core.error().is_none() {
        core.cycle();
        core.take_syscall(|core| {
            if let Err(error) = syscall::dispatch(core) {
                eprintln!("syscall failed: {error}");
                std::process::exit(1);
            }
        });

        counter += 1;
        window_cycles += 1;
        if report && counter > CHECK_INTERVAL {
            let elapsed = window_start.elapsed().as_secs_f64();
            if elapsed > 1.0 {
                let frequency = window_cycles as f64 / elapsed;
                eprintln!("frequency: {:.2} MHz", frequency / 1_000_000.0);
                window_start = Instant::now();
                window_cycles = 0;
            }
            counter = 0;
        }
    }

    // The guest normally leaves through the exit syscall; reaching this
    // point means the core latched an error.
    if let Some(error) = core.error() {
        eprintln!(
            "core fault at pc {:#x}: {error}",
            core.registers().pc & 0x7FFF_FFFF
        );
    }
    1
}

fn main() {
    let args = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{HELP_TEXT}");
            return;
        }
        Ok(ParseResult::Args(args)) => args,
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{HELP_TEXT}");
            std::process::exit(2);
        }
    };

    let memory = Memory::new(args.wram_kib, DEFAULT_SPM_KIB, DEFAULT_SPM_KIB);
    let mut core = Core::new(memory);

    if let Some(kernel) = &args.kernel {
        if let Err(error) = load_image(&mut core, ROM_BEGIN, kernel) {
            eprintln!("error: {error}");
            std::process::exit(2);
        }
    }

    if let Err(error) = load_image(&mut core, WRAM_BEGIN, &args.program) {
        eprintln!("error: {error}");
        std::process::exit(2);
    }
    core.registers_mut().pc = RAW_ENTRY_PC;

    std::process::exit(run(&mut core, args.report));
}
