use clap::Parser;

#[derive(Parser)]
#[command(name = "fbgrab")]
#[command(author, version, about = "HTTP API for extracting downloadable media links from Facebook pages", long_about = None)]
pub struct Cli {
    /// Port to listen on (overrides FBGRAB_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
