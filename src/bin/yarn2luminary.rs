// yarn2luminary - Yarn to Luminary converter
// Converts a compiled Yarn dialogue script into a Luminary assembly listing

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use log::{debug, info};

use luminary_yarn::luminary::output;
use luminary_yarn::{ConverterConfig, LuminaryConverter};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 4 {
        print_usage(invoked_as(&args));
        process::exit(1);
    }

    let input_file = &args[1];
    let output_file = &args[2];
    let program_name = &args[3];

    let config = match ConverterConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        }
    };
    debug!("Configuration: {:?}", config);

    // Read compiled script
    let document = match fs::read_to_string(input_file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading '{}': {}", input_file, err);
            process::exit(1);
        }
    };

    // Convert
    let converter = LuminaryConverter::new(config);
    let listing = match converter.convert(&document, input_file, program_name) {
        Ok(listing) => listing,
        Err(err) => {
            eprintln!("{}, quitting", err);
            process::exit(1);
        }
    };

    // Write output file
    if let Err(err) = output::write_atomically(Path::new(output_file), &listing) {
        eprintln!("Error writing '{}': {}", output_file, err);
        process::exit(1);
    }

    info!("Wrote {} bytes to {}", listing.len(), output_file);
}

/// Name to show in usage text; argv may be empty when spawned by exec
fn invoked_as(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("yarn2luminary")
}

fn print_usage(program_name: &str) {
    println!("= Yarn to Luminary converter =");
    println!();
    println!("Usage: {} <input.toml> <output.asm> <name>", program_name);
    println!();
    println!("Arguments:");
    println!("  input.toml    Compiled Yarn script");
    println!("  output.asm    Assembly listing to write (directories are created)");
    println!("  name          Program name, prefixes every generated label");
    println!();
    println!("Environment:");
    println!("  YARN2LUMINARY_CONFIG   Optional TOML configuration file");
    println!("  RUST_LOG               Log level (default: warn)");
}

#[cfg(test)]
mod tests {
    use super::invoked_as;

    #[test]
    fn test_invoked_as_with_empty_argv() {
        assert_eq!(invoked_as(&[]), "yarn2luminary");
    }

    #[test]
    fn test_invoked_as_uses_first_argument() {
        let args = vec!["./bin/y2l".to_string(), "in.toml".to_string()];
        assert_eq!(invoked_as(&args), "./bin/y2l");
    }
}
