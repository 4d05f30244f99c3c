mod cli;

use clap::Parser;

fn main() {
    let args = cli::Cli::parse();
    cli::init_tracing(args.verbose);
    let code = match cli::run(args) {
        Ok(()) => cli::ExitCode::Ok,
        Err(code) => code,
    };
    std::process::exit(code as i32);
}
