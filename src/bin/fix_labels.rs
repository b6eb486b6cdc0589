use std::process::ExitCode;

fn main() -> ExitCode {
    labelfix::exit_code(labelfix::run_fix())
}
