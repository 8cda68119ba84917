use anyhow::Result;
use clap::Parser;
use console::style;
use log::{error, info};
use media_organize::cli::{Args, EXIT_FATAL, EXIT_SUCCESS};
use media_organize::component::media_organizer::RunReport;
use media_organize::component::{DiscordWebhook, MediaOrganizer, NoopNotifier, Notifier};
use media_organize::config::Config;
use media_organize::init;
use media_organize::signal::setup_shutdown_signal;
use media_organize::tools::format_elapsed;
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    let args = Args::parse();
    init::init(args.verbose);

    match run(&args) {
        Ok(report) => {
            print_result(&report);
            info!("Program exited normally");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            error!("{e:#}");
            eprintln!("{} {e:#}", style("錯誤:").red().bold());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(args: &Args) -> Result<RunReport> {
    let config = Config::new(args.config.as_deref())?;
    let shutdown_signal = setup_shutdown_signal()?;
    let options = args.organizer_options(&config.settings);

    let notifier: Box<dyn Notifier> = match args.notify_endpoint(&config.settings) {
        Some(endpoint) => Box::new(DiscordWebhook::new(
            endpoint,
            Duration::from_secs(config.settings.notify_timeout_secs),
        )?),
        None => Box::new(NoopNotifier),
    };

    MediaOrganizer::new(options, config.extension_table, shutdown_signal)
        .with_notifier(notifier)
        .run(&args.root)
}

fn print_result(report: &RunReport) {
    let summary = &report.summary;

    println!();
    let title = if report.dry_run {
        "=== 整理結果（試執行） ==="
    } else {
        "=== 整理結果 ==="
    };
    println!("{}", style(title).cyan().bold());
    println!(
        "  電影: {} 個已整理，{} 個略過",
        style(summary.movies_organized).green(),
        style(summary.movies_skipped).dim()
    );
    println!(
        "  影集: {} 個已整理，{} 個略過",
        style(summary.tv_organized).green(),
        style(summary.tv_skipped).dim()
    );

    if summary.has_errors() {
        println!("  失敗: {} 個", style(summary.errors.len()).red());
        for message in &summary.errors {
            println!("    {} {message}", style("✗").red());
        }
    }

    if report.interrupted {
        println!("  {}", style("操作已中斷").yellow());
    }

    println!("  耗時: {}", format_elapsed(report.elapsed));
}
