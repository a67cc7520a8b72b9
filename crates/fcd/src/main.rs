mod script;

use std::error::Error;
use std::{fmt, process};

use clap::{Parser, Subcommand};
use fcd_core::binding::{CharDevice, DeviceNumber, Errno};
use fcd_core::{FcdResult, SeekMode, Session};
use fcd_utils::{info, init_logging, DeviceConfig, LogConfig, LogLevel};

use crate::script::{parse_script, Op};

/// Drive a fixed-capacity faux character device from the command line.
#[derive(Parser, Debug)]
#[command(name = "fcd")]
#[command(version)]
#[command(about = "Drive a fixed-capacity faux character device", long_about = None)]
struct Cli
{
    /// Buffer capacity in bytes (overrides FCD_CAPACITY)
    #[arg(long, global = true)]
    capacity: Option<usize>,
    /// Device name (overrides FCD_DEVICE_NAME)
    #[arg(long, global = true)]
    name: Option<String>,
    /// Device major number (0-4095)
    #[arg(long, global = true, default_value_t = 240)]
    major: u32,
    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true, value_parser = parse_level)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Run the reference write/seek/read walkthrough
    Demo,
    /// Execute operations against a fresh device, in order
    Exec
    {
        /// Operations: write:<text>, fill:<byte>:<count>, read:<count>, seek:<set|cur|end>:<offset>
        #[arg(required = true, allow_hyphen_values = true)]
        ops: Vec<String>,
    },
    /// Show device information
    Info,
}

fn parse_level(s: &str) -> Result<LogLevel, String>
{
    s.parse().map_err(|e: fcd_utils::LoggingError| e.to_string())
}

fn main()
{
    let cli = Cli::parse();

    let _guard = match init_logging(&LogConfig::from_env().with_level(cli.log_level)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_command(cli: Cli) -> Result<(), Box<dyn Error>>
{
    let config = DeviceConfig::from_env()?.with_overrides(cli.name, cli.capacity)?;
    let device = CharDevice::new(config.name, DeviceNumber::new(cli.major, 0)?, config.capacity)?;
    info!(
        "Device {} ready: number {}, capacity {}",
        device.name(),
        device.number(),
        device.buffer().capacity()
    );

    match cli.command {
        Commands::Demo => run_demo(&device),
        Commands::Exec { ops } => {
            // Whole script is parsed before the device is touched
            let ops = parse_script(&ops)?;
            let mut session = device.buffer().open_session();
            for op in &ops {
                run_op(&mut session, op);
            }
            session.close();
            Ok(())
        }
        Commands::Info => {
            print_device_info(&device);
            Ok(())
        }
    }
}

/// Steps of the reference walkthrough for a buffer of `capacity` bytes
fn demo_steps(capacity: usize) -> Vec<Op>
{
    vec![
        Op::Fill(0xAA, capacity.saturating_add(88)),
        Op::Fill(0xAA, 1),
        Op::Seek(SeekMode::FromStart, 0),
        Op::Read(capacity.saturating_mul(2)),
        Op::Read(capacity.saturating_mul(2)),
        Op::Seek(SeekMode::FromEnd, -10),
        Op::Seek(SeekMode::FromEnd, 20),
    ]
}

fn run_demo(device: &CharDevice) -> Result<(), Box<dyn Error>>
{
    print_device_info(device);
    println!();
    let mut session = device.buffer().open_session();
    for step in &demo_steps(device.buffer().capacity()) {
        run_op(&mut session, step);
    }
    session.close();
    Ok(())
}

/// Result of one successful operation
#[derive(Debug, PartialEq, Eq)]
enum Outcome
{
    Wrote(usize),
    Read(Vec<u8>),
    Position(usize),
}

impl fmt::Display for Outcome
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Outcome::Wrote(n) => write!(f, "wrote {n}"),
            Outcome::Read(bytes) => write!(f, "read {}: {}", bytes.len(), preview(bytes)),
            Outcome::Position(pos) => write!(f, "position {pos}"),
        }
    }
}

fn apply_op(session: &mut Session<'_>, op: &Op) -> FcdResult<Outcome>
{
    let capacity = session.buffer().capacity();
    match op {
        Op::Write(bytes) => session.write_from(bytes).map(Outcome::Wrote),
        Op::Fill(byte, count) => {
            // Anything past capacity would be clamped away by the write
            let bytes = vec![*byte; (*count).min(capacity)];
            session.write_from(&bytes).map(Outcome::Wrote)
        }
        Op::Read(count) => {
            let mut out = Vec::with_capacity((*count).min(capacity));
            session.read_into(*count, &mut out).map(|_| Outcome::Read(out))
        }
        Op::Seek(mode, offset) => session.seek_to(*offset, *mode).map(Outcome::Position),
    }
}

fn run_op(session: &mut Session<'_>, op: &Op)
{
    let label = op.to_string();
    match apply_op(session, op) {
        Ok(result) => println!("{label:<24} -> {result} (position {})", session.position()),
        Err(err) => {
            let errno = Errno::from(err.clone());
            println!("{label:<24} -> error {errno}: {err} (position {})", session.position());
        }
    }
}

fn preview(bytes: &[u8]) -> String
{
    const LIMIT: usize = 32;
    if bytes.is_empty() {
        return "<eof>".to_string();
    }
    if bytes.iter().all(|&b| b == bytes[0]) && bytes.len() > 1 {
        return format!("{} x 0x{:02x}", bytes.len(), bytes[0]);
    }
    let shown = &bytes[..bytes.len().min(LIMIT)];
    let suffix = if bytes.len() > LIMIT { "..." } else { "" };
    format!("\"{}\"{suffix}", shown.escape_ascii())
}

fn print_device_info(device: &CharDevice)
{
    println!("Device Information:");
    println!("  Name: {}", device.name());
    println!("  Number <major>:<minor>: {}", device.number());
    println!("  Capacity: {} bytes", device.buffer().capacity());
}
