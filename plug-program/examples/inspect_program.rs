//! Standalone program inspector
//!
//! Decodes a program string and prints its events and commands, then the
//! re-encoded string.
//!
//! Usage:
//!   inspect_program <program> [--keys <count>] [--outputs <count>]
//!
//! Example:
//!   inspect_program "s1@reset:a1w5a0" --keys 1 --outputs 2

use plug_program::{decode, encode, DeviceConfig, Program, Vocabulary};
use std::env;

fn print_program(program: &Program) {
    if program.is_empty() {
        println!("(no events)");
        return;
    }
    for event in program.events() {
        println!("{} [{}]", event.label(), event.code());
        for command in event.commands() {
            println!("    {:<6} {} {}", command.label(), command.code(), command.argument());
        }
    }
}

fn parse_count(args: &[String], i: usize) -> Result<u32, Box<dyn std::error::Error>> {
    let value = args.get(i).ok_or("missing count")?;
    Ok(value.parse()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <program> [--keys <count>] [--outputs <count>]", args[0]);
        eprintln!("\nExample:");
        eprintln!("  {} \"s1@reset:a1w5a0\" --keys 1 --outputs 2", args[0]);
        std::process::exit(1);
    }

    let text = &args[1];
    let mut config = DeviceConfig::new();

    // Parse arguments
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--keys" => {
                i += 1;
                config.key_count = parse_count(&args, i)?;
            }
            "--outputs" => {
                i += 1;
                config.out_count = parse_count(&args, i)?;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let vocabulary = Vocabulary::from_config(&config)?;
    let program = decode(text, &vocabulary)?;

    println!("=== PROGRAM ===");
    print_program(&program);
    println!("\n=== SUMMARY ===");
    println!("Events: {}", program.len());
    println!("Commands: {}", program.command_count());
    println!("Encoded: {}", encode(&program, &vocabulary)?);

    Ok(())
}
