use std::process;
use log::{debug, error};

use rasterwarp::api::RasterWarp;
use rasterwarp::commands::{build_cli, config_from_args, CommandFactory, RasterwarpCommandFactory};
use rasterwarp::utils::logger::Logger;

fn main() {
    let matches = build_cli().get_matches();

    let config = match config_from_args(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger(config.log_file.as_deref(), config.log_level) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }
    debug!("Configuration: {:?}", config);

    let warp = RasterWarp::new(config);
    let factory = RasterwarpCommandFactory::new();

    let command_result = factory.create_command(&matches, &warp);
    match command_result {
        Ok(command) => match command.execute() {
            Ok(report) => print!("{}", report),
            Err(e) => {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
