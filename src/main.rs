use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use voxcheck::{check, context::ContextError, driver};
use voxcheck::{DuplicateKeying, ExpectedProperties, ReportFormat, RunContext, RunOptions};

#[derive(Parser)]
#[command(name = "voxcheck")]
#[command(version, about = "Validate speech-dataset audio and transcription files", long_about = None)]
struct Cli {
    /// Path to the dataset root
    #[arg(long, default_value = ".")]
    path: std::path::PathBuf,

    /// Comma-separated transcription manifest file names
    #[arg(long, default_value = "list_train.txt,list_val.txt")]
    files: String,

    /// Name of the folder holding the audio files
    #[arg(long = "dir-name", default_value = "wavs")]
    dir_name: String,

    /// Expected sample rate in Hz
    #[arg(long = "sample-rate", default_value_t = 22050)]
    sample_rate: u32,

    /// Maximum number of audio channels
    #[arg(long, default_value_t = 1)]
    channels: u16,

    /// Minimum audio duration in milliseconds
    #[arg(long = "min-duration", default_value_t = 2000)]
    min_duration: u64,

    /// Maximum audio duration in milliseconds
    #[arg(long = "max-duration", default_value_t = 10000)]
    max_duration: u64,

    /// Maximum number of pipe delimiters per manifest line
    #[arg(long = "max-pipes", default_value_t = 1)]
    max_pipes: usize,

    /// Comma-separated check ids to disable (e.g. "T005,F002")
    #[arg(long, default_value = "")]
    disable: String,

    /// List the registered checks and exit
    #[arg(long = "list-checks")]
    list_checks: bool,

    /// Key duplicate detection by the raw path string instead of the
    /// separator-normalized form
    #[arg(long = "raw-duplicate-keys")]
    raw_duplicate_keys: bool,

    /// Save the report (presentation stripped) to a file
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,

    /// Console output format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Also show OK summary lines
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("voxcheck=debug")
    } else {
        EnvFilter::new("voxcheck=info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn split_list(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_context(cli: &Cli) -> Result<RunContext, ContextError> {
    RunContext::new(
        cli.path.clone(),
        split_list(&cli.files),
        cli.dir_name.clone(),
        ExpectedProperties {
            sample_rate: cli.sample_rate,
            channel_count: cli.channels,
            min_duration_ms: cli.min_duration,
            max_duration_ms: cli.max_duration,
            max_delimiter_count: cli.max_pipes,
        },
        if cli.raw_duplicate_keys {
            DuplicateKeying::Raw
        } else {
            DuplicateKeying::Canonical
        },
    )
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let checks = check::registry(&split_list(&cli.disable));

    if cli.list_checks {
        driver::print_check_list(&checks);
        return Ok(());
    }

    let ctx = match build_context(&cli) {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let opts = RunOptions {
        verbose: cli.verbose,
        output: cli.output.clone(),
        format: cli.format.into(),
    };

    let summary = driver::execute(&ctx, checks, &opts)?;
    std::process::exit(summary.exit_code());
}
