mod cli;
mod jq_exec;
mod path_de;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    tracing_subscriber::fmt()
        .with_max_level(command_line_interface.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
