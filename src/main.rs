//! captionmorph CLI - Splice an image so its rows follow a caption

use captionmorph::{morph_dynamic, MorphError, NoMatchPolicy};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "captionmorph", about = "Splice an image so its rows follow a caption")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// String describing the input image from top to bottom
    reference: String,
    /// Caption the output image should follow
    target: String,
    /// Output image file (default: <input>-morphed.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Fail when part of the target shares nothing with the reference
    #[arg(long)]
    strict: bool,
    /// Print the aligned reference ranges as JSON
    #[arg(long)]
    ranges: bool,
    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("captionmorph: {e}");
            ExitCode::from(exit_status(&e))
        }
    }
}

fn run(args: &Args) -> Result<(), MorphError> {
    let policy = if args.strict { NoMatchPolicy::Error } else { NoMatchPolicy::Skip };

    if args.ranges {
        let ranges = captionmorph::decompose(args.reference.as_bytes(), args.target.as_bytes(), policy)?;
        println!("{}", serde_json::to_string(&ranges)?);
    }

    let image = image::open(&args.input)?;
    let morphed = morph_dynamic(&image, &args.reference, &args.target, policy)?;

    let output = args.output.clone().unwrap_or_else(|| default_output(&args.input));
    morphed.save(&output)?;
    info!(
        output = %output.display(),
        width = morphed.width(),
        height = morphed.height(),
        "wrote morphed image"
    );
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("CAPTIONMORPH_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn exit_status(err: &MorphError) -> u8 {
    match err {
        MorphError::NoMatch { .. } => 3,
        MorphError::OutOfRangeIndex { .. } => 70,
        MorphError::Image(_) | MorphError::Io(_) | MorphError::Json(_) => 1,
    }
}

/// `photo.jpg` -> `photo-morphed.jpg`, next to the input
fn default_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{stem}-morphed.{}", ext.to_string_lossy()),
        None => format!("{stem}-morphed.png"),
    };
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(default_output(Path::new("img/cat.jpg")), PathBuf::from("img/cat-morphed.jpg"));
        assert_eq!(default_output(Path::new("cat")), PathBuf::from("cat-morphed.png"));
    }

    #[test]
    fn no_match_has_its_own_status() {
        let err = MorphError::NoMatch { fragment: "?".into() };
        assert_eq!(exit_status(&err), 3);
    }

    #[test]
    fn args_parse() {
        let args = Args::parse_from(["captionmorph", "in.png", "Hello World", "Hello", "--strict", "-vv"]);
        assert!(args.strict);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.target, "Hello");
        assert!(args.output.is_none());
    }
}
