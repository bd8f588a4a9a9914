use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "auth-smoke")]
#[command(about = "Onboarding auth-prompt smoke test")]
#[command(version)]
struct Cli {
    /// Flow config file (YAML); the reference journey is compiled in
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target URL (overrides config)
    #[arg(long)]
    url: Option<String>,

    /// Screenshot output path (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run with a visible browser window (overrides config)
    #[arg(long)]
    headful: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate config without running
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> auth_smoke::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut config = match cli.config {
        Some(ref path) => auth_smoke::FlowConfig::load(path)?,
        None => auth_smoke::FlowConfig::default(),
    };

    if let Some(url) = cli.url {
        config.target.url = url;
    }
    if let Some(output) = cli.output {
        config.evidence.screenshot = output;
    }
    if cli.headful {
        config.browser.headless = false;
    }
    config.validate()?;

    if cli.check {
        println!("Config valid");
        println!("  Target: {}", config.target.url);
        println!("  Button: \"{}\"", config.journey.button_label);
        println!("  Expect: \"{}\"", config.journey.confirmation_text);
        println!("  Screenshot: {}", config.evidence.screenshot.display());
        println!(
            "  Timeouts: actionable {}ms, visible {}ms",
            config.timeouts.actionable_ms, config.timeouts.visible_ms
        );
        return Ok(());
    }

    println!("Running onboarding smoke test against {}", config.target.url);

    let report = auth_smoke::run_once(&config).await?;

    // Print result
    println!();
    if report.success {
        println!("✓ Success");
        if let Some(ref path) = report.screenshot {
            println!("  Screenshot: {}", path.display());
        }
    } else {
        println!("✗ Failed");
        if let Some(ref error) = report.error {
            println!("  Error: {}", error);
        }
    }
    println!(
        "  Steps: {}/{}",
        report.steps_completed,
        auth_smoke::STEP_COUNT
    );
    println!("  Duration: {}ms", report.duration_ms);

    if !report.success {
        std::process::exit(1);
    }

    Ok(())
}
