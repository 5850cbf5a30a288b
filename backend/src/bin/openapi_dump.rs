//! Write the OpenAPI document as JSON to stdout or a file.

use std::io::{self, Write as _};
use std::path::PathBuf;

use clap::Parser;
use depot::doc::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(about = "Export the Depot OpenAPI document")]
struct Args {
    /// Destination file. Writes to stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;

    match args.output {
        Some(path) => std::fs::write(path, json),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")
        }
    }
}
