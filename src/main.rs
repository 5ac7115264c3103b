use clap::Parser;
use deployctl::adapter::inbound::cli::command::Cli;
use deployctl::adapter::inbound::cli::{dispatch, operator, output};
use deployctl::infrastructure::operator::Operator;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if operator::install(Box::new(Operator::new())).is_err() {
        output::error("operator already installed");
        std::process::exit(1);
    }
    dispatch::configure(&cli);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            output::error(&format!("failed to start runtime: {e}"));
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(dispatch::execute(&cli)) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
