use std::process::ExitCode;

fn main() -> ExitCode {
    match heartpage::cli::main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[heartpage][error] {e:#}");
            ExitCode::FAILURE
        }
    }
}
