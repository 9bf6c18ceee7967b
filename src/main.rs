use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = contactme::cli::Cli::parse();
    contactme::logging::init(cli.verbose);

    if let Err(err) = contactme::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
