#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = kinfolk_cli::run_from_env() {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
