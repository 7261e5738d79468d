//!Command-line harness for the PCA9685 driver: load a device config,
//!bring the chip up, set one duty cycle.
//!
//!Usage: `pca9685_ctl [config-file] <channel|all> <percent>`
//!
//!Without a config file the built-in defaults are used (bus "i2c-1",
//!address 0x40, 50Hz).

use config_rs::{Config, File};
use pca9685_driver::config::Pca9685Config;
use pca9685_driver::Channel;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn load_config(path: Option<&str>) -> Result<Pca9685Config, String> {
    match path {
        Some(path) => Config::builder()
            .add_source(File::with_name(path))
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|err| format!("could not load config {}: {}", path, err)),
        None => Ok(Pca9685Config::default()),
    }
}

fn parse_channel(arg: &str) -> Result<Channel, String> {
    if arg.eq_ignore_ascii_case("all") {
        Ok(Channel::All)
    } else {
        arg.parse::<u8>()
            .map(Channel::Pwm)
            .map_err(|_| format!("channel must be 0-15 or \"all\", got {:?}", arg))
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let (config_path, channel_arg, percent_arg) = match args {
        [channel, percent] => (None, channel, percent),
        [config, channel, percent] => (Some(config.as_str()), channel, percent),
        _ => return Err("usage: pca9685_ctl [config-file] <channel|all> <percent>".to_string()),
    };

    let config = load_config(config_path)?;
    let channel = parse_channel(channel_arg)?;
    let percent: f64 = percent_arg
        .parse()
        .map_err(|_| format!("percent must be a number 0-100, got {:?}", percent_arg))?;

    let mut device =
        pca9685_rpi::try_build_device(&config).map_err(|err| format!("{:?}", err))?;
    device
        .set_duty_cycle(channel, percent)
        .map_err(|err| format!("{:?}", err))?;

    info!(
        "set {:?} on {} (address {:#04x}) to {}%",
        channel, config.i2c_bus, config.i2c_address, percent
    );
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pca9685_driver=info,pca9685_rpi=info,pca9685_ctl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(message) = run(&args) {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}
