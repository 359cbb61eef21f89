use std::env;
use std::fs;
use std::io::{self, Read};

use onigiri::{Regex, RegexOptions};

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        onigiri::repl::run_repl();
        return;
    }

    let mut options = RegexOptions::new();
    while args.first().is_some_and(|a| a.starts_with('-')) {
        let flag = args.remove(0);
        match flag.as_str() {
            "-i" => options = options.with(RegexOptions::IGNORE_CASE),
            "-m" => options = options.with(RegexOptions::MULTILINE),
            other => {
                eprintln!("Unknown flag: {}", other);
                std::process::exit(2);
            }
        }
    }
    if args.is_empty() {
        eprintln!("Usage: onigiri [-i] [-m] PATTERN [FILE]");
        std::process::exit(2);
    }
    let pattern = args.remove(0);
    let re = match Regex::new(&pattern, options) {
        Ok(re) => re,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let input = if let Some(path) = args.first() {
        fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("Failed to read {}: {}", path, err);
            std::process::exit(1);
        })
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).unwrap_or_else(|err| {
            eprintln!("Failed to read stdin: {}", err);
            std::process::exit(1);
        });
        buf
    };

    for line in input.lines() {
        if re.has_match(line) {
            println!("{}", line);
        }
    }
}
