use clap::Parser;
use lqip::config::{self, LqipConfig};
use lqip::{Image, LqipOptions, output};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lqip")]
#[command(about = "Generate Low Quality Image Placeholders")]
#[command(long_about = "\
Generate Low Quality Image Placeholders

Reads an image and reports its size, aspect ratio (height / width), a named
color palette, and two tiny base64 previews (3x3 and 12x12) ready to inline
as data URIs while the full image loads.

Previews are re-encoded in the source format; only PNG, GIF and JPEG inputs
can produce them.

Output:
  default   a table on stdout
  --json    a JSON file next to the input (photo.png -> photo.json)

Run 'lqip --gen-config' to print a documented lqip.toml.")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Filepath of the input image
    #[arg(
        short,
        long,
        value_name = "FILE",
        allow_hyphen_values = true,
        required_unless_present_any = ["version", "gen_config"]
    )]
    input: Option<PathBuf>,

    /// Write the result as a JSON file instead of printing a table
    #[arg(long)]
    json: bool,

    /// Path of the JSON file (defaults to the input path with a .json extension)
    #[arg(short, long, value_name = "FILE", allow_hyphen_values = true, requires = "json")]
    output: Option<PathBuf>,

    /// Configuration file (see --gen-config)
    #[arg(short, long, value_name = "FILE", allow_hyphen_values = true)]
    config: Option<PathBuf>,

    /// Print a stock lqip.toml with all options documented
    #[arg(long)]
    gen_config: bool,

    /// Show version and exit
    #[arg(short = 'v', long)]
    version: bool,
}

/// Options whose next argument is a value, never a flag.
const VALUE_OPTIONS: &[&str] = &["-i", "--input", "-o", "--output", "-c", "--config"];

/// Accept the single-dash long flags (`-json`, `-version`) older scripts use.
///
/// An argument that is the value of `-i`/`-o`/`-c` is passed through as is.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut normalized = Vec::new();
    let mut expects_value = false;
    for arg in args {
        let is_value = expects_value;
        expects_value = !is_value && arg.to_str().is_some_and(|a| VALUE_OPTIONS.contains(&a));
        normalized.push(match arg.to_str() {
            Some("-json") if !is_value => OsString::from("--json"),
            Some("-version") if !is_value => OsString::from("--version"),
            _ => arg,
        });
    }
    normalized
}

fn main() {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.version {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    init_tracing();

    let lqip_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => LqipConfig::default(),
    };
    init_thread_pool(&lqip_config.processing);

    let input = cli.input.ok_or("an input file is required (-i <FILE>)")?;
    let data = Image::new(&input)
        .with_options(LqipOptions::from(&lqip_config))
        .summarize()?;

    if cli.json {
        let json_path = cli
            .output
            .unwrap_or_else(|| output::default_json_path(&input));
        output::write_json(&json_path, &data)?;
        println!("==> Wrote {}", json_path.display());
    } else {
        output::print_table(&input, &data, lqip_config.output.wrap_width);
    }

    Ok(())
}

/// Log to stderr so table and JSON output on stdout stay clean.
///
/// Defaults to warnings only; `RUST_LOG=lqip=debug` shows each codec step.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lqip=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let cli = parse(&["lqip", "-i", "a.png", "-json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.input, Some(PathBuf::from("a.png")));

        assert!(parse(&["lqip", "-version"]).unwrap().version);
        assert!(parse(&["lqip", "-v"]).unwrap().version);
        assert!(parse(&["lqip", "--version"]).unwrap().version);
    }

    #[test]
    fn option_values_are_not_rewritten() {
        let args = ["lqip", "-i", "-json", "--json", "-o", "-version"].map(OsString::from);
        let normalized = normalize_args(args);
        assert_eq!(
            normalized,
            ["lqip", "-i", "-json", "--json", "-o", "-version"].map(OsString::from)
        );

        let cli = parse(&["lqip", "-i", "a.png", "-json", "-o", "-json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.output, Some(PathBuf::from("-json")));
    }

    #[test]
    fn input_is_required_unless_version_or_gen_config() {
        assert!(parse(&["lqip"]).is_err());
        assert!(parse(&["lqip", "--json"]).is_err());
        assert!(parse(&["lqip", "--gen-config"]).is_ok());
    }

    #[test]
    fn output_requires_json() {
        assert!(parse(&["lqip", "-i", "a.png", "-o", "out.json"]).is_err());
        let cli = parse(&["lqip", "-i", "a.png", "--json", "-o", "out.json"]).unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
