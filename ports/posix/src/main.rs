use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use smith_engine::hardware::{registers, STATUS_READY};
use smith_engine::{DoorMonitor, PrintEngine, Settings};
use smith_hal::pipe::NamedPipeI2cDevice;
use smith_hal::recording::RecordingDevice;
use smith_hal::{I2cDevice, SysfsPin};
use smith_posix::{input, logger, PosixPort, RunOutcome};

#[derive(Parser, Debug)]
#[command(author, version, about = "Smith printer control loop")]
struct Opts {
    /// Settings file (JSON)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Number of layers; counted from the print data when omitted
    #[arg(long, value_name = "N")]
    layers: Option<u32>,

    /// FIFO carrying controller replies
    #[arg(long, value_name = "FIFO", requires = "write_pipe")]
    read_pipe: Option<PathBuf>,

    /// FIFO carrying controller commands
    #[arg(long, value_name = "FIFO", requires = "read_pipe")]
    write_pipe: Option<PathBuf>,

    /// Run against an in-process controller that accepts every command
    #[arg(long, conflicts_with_all = ["read_pipe", "write_pipe"])]
    no_hardware: bool,

    /// Sysfs `value` file of the door switch
    #[arg(long, value_name = "VALUE_FILE")]
    door_gpio: Option<PathBuf>,

    #[arg(long, default_value = "info", value_name = "LEVEL")]
    log_level: LevelFilter,
}

impl Opts {
    fn open_device(&self) -> Result<Box<dyn I2cDevice>> {
        match (&self.read_pipe, &self.write_pipe) {
            (Some(read), Some(write)) => {
                let device = NamedPipeI2cDevice::open(read, write).with_context(|| {
                    format!(
                        "opening controller pipes {} and {}",
                        read.display(),
                        write.display()
                    )
                })?;
                Ok(Box::new(device))
            }
            _ if self.no_hardware => {
                let device = RecordingDevice::new();
                device.set_register(registers::STATUS, STATUS_READY);
                Ok(Box::new(device))
            }
            _ => bail!("either --read-pipe/--write-pipe or --no-hardware is required"),
        }
    }

    fn load_settings(&self) -> Result<Settings> {
        match &self.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display())),
            None => Ok(Settings::new()),
        }
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    logger::init(opts.log_level).context("installing logger")?;

    let settings = opts.load_settings()?;
    let mut engine = PrintEngine::new(opts.open_device()?);
    match opts.layers {
        Some(layers) => engine.set_num_layers(layers),
        None => {
            engine
                .load_print_data(&settings)
                .context("counting layers (pass --layers to override)")?;
        }
    }
    engine.begin().context("starting print engine")?;

    let port = PosixPort::new();
    let stop = port.stop_handle();
    ctrlc::set_handler(move || stop.stop()).context("installing Ctrl-C handler")?;

    input::spawn_reader(
        BufReader::new(io::stdin()),
        engine.poster(),
        port.stop_handle(),
    );

    let mut door = opts
        .door_gpio
        .as_ref()
        .map(|path| DoorMonitor::new(SysfsPin::new(path), engine.poster()));

    match port.run(&mut engine, door.as_mut()) {
        RunOutcome::Stopped => {
            info!("job status {:?}", engine.job().status);
            Ok(())
        }
        RunOutcome::Halted => match engine.fatal_error() {
            Some(e) => bail!("print engine halted: {}", e),
            None => bail!("print engine halted"),
        },
    }
}
