use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "snap2js-rs",
    about = "Translate a Snap! project XML file into JavaScript for the sprite runtime."
)]
pub struct Args {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(value_name = "OUTPUT", help = "Write generated code here instead of stdout.")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        help = "Fail on argument nodes of unknown shape instead of emitting `undefined`."
    )]
    pub strict: bool,

    #[arg(long, short, help = "Do not print stage progress to stderr.")]
    pub quiet: bool,
}
