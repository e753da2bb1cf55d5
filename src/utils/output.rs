// Colored terminal output helpers
//
// Everything goes to stderr so a tool's own stdout stays untouched.
use crate::task::CommandSpec;
use colored::Colorize;

pub fn print_pass(msg: &str) {
    eprintln!("{}  {}", "PASS".green(), msg);
}

pub fn print_fail(msg: &str) {
    eprintln!("{}  {}", "FAIL".red(), msg);
}

pub fn print_detail(msg: &str) {
    eprintln!("      {}", msg);
}

/// Echo a command line before it runs, the way make does
pub fn print_command(command: &CommandSpec) {
    eprintln!("{}", format!("$ {}", command).dimmed());
}
