use std::process::ExitCode;

fn main() -> ExitCode {
    match bindbench::run() {
        Ok(status) => status.exit_code(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
