use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hashref",
    version,
    about = "Attach, fetch and remove metadata for text, files and hashes"
)]
pub struct Cli {
    #[arg(
        short = 'c',
        long,
        help = "Path to hashref config (default: ~/.hashref), can be overwritten by environment"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        short = 'd',
        long,
        help = "Show the full document instead of a status line"
    )]
    pub details: bool,
    #[arg(short = 'g', long, help = "Generate client configuration")]
    pub generate: bool,
    #[arg(
        short = 'm',
        long,
        help = "Read metadata from JSON file(s), comma separated; later files overwrite earlier keys, empty values are removed"
    )]
    pub meta: Option<String>,
    #[arg(short = 'r', long, help = "Remove hash from the store")]
    pub remove: bool,
    #[arg(short = 's', long, help = "Set metadata for input, replacing the stored document")]
    pub set: bool,
    #[arg(long = "self", help = "Set/get metadata about yourself")]
    pub self_mode: bool,
    #[arg(short = 'o', long, help = "Write output to file ('-' for stdout, default stderr)")]
    pub output: Option<String>,
    #[arg(short = 'p', long, help = "Limit request to data from publisher")]
    pub publisher: Option<String>,
    #[arg(short = 'v', long, help = "Show verbose output")]
    pub verbose: bool,
    #[arg(short = 'y', long, help = "Always confirm")]
    pub yes: bool,
    #[arg(value_name = "INPUT", help = "Files, strings, hashes")]
    pub input: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Generate,
    SelfManage,
    Set,
    Get,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.generate {
            Mode::Generate
        } else if self.self_mode {
            Mode::SelfManage
        } else if self.set {
            Mode::Set
        } else {
            Mode::Get
        }
    }
}
