use anyhow::Context;
use clap::Parser;
use std::process;
use taskdata_mapper::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let result = commands::run(args).context("Conversion failed");

    match result {
        Ok(_stats) => {
            // Success - the summary has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("TaskData Mapper - ISO 11783-10 TaskData Converter");
    println!("=================================================");
    println!();
    println!("Convert ISO 11783-10 TaskData tasks to and from a canonical");
    println!("agricultural operations model.");
    println!();
    println!("USAGE:");
    println!("    taskdata-mapper <COMMAND> <BUNDLE> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import TaskData tasks as work items and logged data");
    println!("    export      Export work items and logged data as TaskData tasks");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import the tasks of a bundle:");
    println!("    taskdata-mapper import field-season.json");
    println!();
    println!("    # Export with a full DDI dictionary and a custom output path:");
    println!("    taskdata-mapper export field-season.json --ddi-export ddiexport.txt \\");
    println!("                           --output taskdata.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    taskdata-mapper <COMMAND> --help");
}
