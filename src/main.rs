use clap::Parser;
use logvault::config::Config;
use std::time::Instant;

#[tokio::main]
async fn main() {
  let started_at = Instant::now();
  let config = Config::parse();

  if let Err(e) = logvault::app::run(config, started_at).await {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}
