use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use vignette_effect::batch::{BatchConfig, run_batch};

#[derive(Parser, Debug)]
#[command(version, about = "Apply a radial falloff vignette to every image in a directory")]
struct Args {
    /// Directory containing the input images
    input_dir: PathBuf,

    /// Output directory, defaults to <INPUT_DIR>/output
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Extension of the input files, matched case-insensitively (`png` also picks up `.PNG`)
    #[arg(short, long, default_value = "png")]
    extension: String,

    /// Prefix of the numbered output files
    #[arg(long, default_value = "output ")]
    prefix: String,

    /// Zero-padded width of the output index
    #[arg(long, default_value_t = 3)]
    index_width: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("{args:?}");

    let mut config = BatchConfig::new(args.input_dir)
        .with_extension(args.extension)
        .with_output_prefix(args.prefix)
        .with_index_width(args.index_width);

    if let Some(output_dir) = args.output_dir {
        config = config.with_output_dir(output_dir);
    }

    let report = run_batch(&config)
        .with_context(|| format!("Failed to process {}", config.input_dir.display()))?;

    for (input, output) in &report.processed {
        println!("{} -> {}", input.display(), output.display());
    }

    for (input, reason) in &report.failed {
        eprintln!("skipped {}: {reason}", input.display());
    }

    println!(
        "{} of {} image(s) vignetted",
        report.processed.len(),
        report.total()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["vignette-batch", "/data/images"]).unwrap();
        assert_eq!(args.extension, "png");
        assert_eq!(args.prefix, "output ");
        assert_eq!(args.index_width, 3);
        assert!(args.output_dir.is_none());
    }

    #[test]
    fn test_extension_help_mentions_case() {
        let help = Args::command().render_help().to_string();
        assert!(help.contains("case-insensitively"));
    }
}
