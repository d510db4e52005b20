use playlist_harvest::{logging, Config, Error};
use std::{env, io, process};

fn main() {
    let config = Config::build(env::args()).unwrap_or_else(|e| {
        if let Error::Cli(e) = e {
            e.exit();
        }
        eprintln!("Problem parsing arguments: {}", e);
        process::exit(1);
    });

    logging::init(config.verbose);

    if let Err(e) = playlist_harvest::run(config, io::stdin().lock()) {
        eprintln!("Application error: {}", e);
        process::exit(1);
    }
}
