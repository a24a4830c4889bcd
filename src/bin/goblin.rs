use std::process::ExitCode;

fn main() -> ExitCode {
    goblin::runner::run()
}
