use std::{env, process};

mod cli;
mod utils;
mod convert;

use crate::cli::Resolved;

fn main() {
    let config = match cli::resolve(env::args_os()) {
        Resolved::Config(config) => config,
        Resolved::Help(text) => {
            println!("{}", text);
            process::exit(0);
        },
        Resolved::Error(msg) => {
            eprintln!("{}", msg);
            process::exit(1);
        },
    };
    match convert::convert(&config) {
        Ok(_) => (),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(err.exit_code());
        },
    }
}
