//! # mgmt-xml
//!
//! Translates the management section of a configuration document into the
//! ordered list of add commands and prints it.

use clap::{Parser, ValueEnum};
use mgmt_xml::config::runtime::RuntimeConfig;
use mgmt_xml::file_processor;
use mgmt_xml::logging::{self, LogEvent, LogLevel, Logger, LoggingService};
use mgmt_xml::{pipeline, PipelineOutput, PipelineResult, TranslationOptions};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mgmt-xml", version, about = "Translate management XML into add commands")]
struct Cli {
    /// Server, host or domain configuration document
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Root every address under host=NAME
    #[arg(long, value_name = "NAME")]
    host: Option<String>,

    /// Fail when no management-interfaces element is present
    #[arg(long)]
    require_native_interface: bool,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write the commands here instead of stdout
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Forwards library log events to the `log` facade
struct LogBridge;

impl Logger for LogBridge {
    fn log(&self, event: &LogEvent) {
        let level = match event.level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        };
        let mut line = format!("[{}] {}", event.code.as_str(), event.message);
        if let Some(position) = &event.position {
            line.push_str(&format!(" at {}", position));
        }
        let mut context: Vec<_> = event.context.iter().collect();
        context.sort();
        for (key, value) in context {
            line.push_str(&format!(" {}={}", key, value));
        }
        log::log!(target: "mgmt_xml", level, "{}", line);
    }
}

fn bridge_min_level() -> LogLevel {
    match log::max_level() {
        log::LevelFilter::Off | log::LevelFilter::Error => LogLevel::Error,
        log::LevelFilter::Warn => LogLevel::Warning,
        log::LevelFilter::Info => LogLevel::Info,
        log::LevelFilter::Debug | log::LevelFilter::Trace => LogLevel::Debug,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let runtime = RuntimeConfig::from_env();
    if let Err(message) = logging::config::init_runtime_preferences(runtime.logging.clone()) {
        log::warn!("{}", message);
    }

    let service = LoggingService::new(Arc::new(LogBridge), bridge_min_level());
    if let Err(message) = logging::init_global_logging_with_service(Arc::new(service)) {
        log::warn!("library logging unavailable: {}", message);
    }

    if let Err(message) = file_processor::init_file_processor_logging() {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }
    log::debug!("{}", logging::config::get_config_summary());

    let cli = Cli::parse();
    if let Err(message) = run(&cli, &runtime) {
        eprintln!("{}", message);
        if let Some(summary) = logging::cargo_style_summary() {
            eprintln!("{}", summary);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli, runtime: &RuntimeConfig) -> Result<(), String> {
    let mut options = TranslationOptions::from_preferences(&runtime.translation)
        .with_document_preferences(runtime.document.clone());
    if let Some(host) = &cli.host {
        options = options.with_host(host);
    }
    if cli.require_native_interface {
        options = options.with_native_interface_required(true);
    }

    let path = cli.file.display().to_string();
    log::info!("translating {}", path);

    let result = pipeline::process_file(&path, &options)
        .map_err(|e| format!("error[{}]: {}", e.error_code(), e))?;

    let rendered = render(&result, cli.format)?;
    match &cli.output {
        Some(output) => fs::write(output, rendered)
            .map_err(|e| format!("error: cannot write {}: {}", output.display(), e))?,
        None => println!("{}", rendered),
    }

    log::info!(
        "{} commands from {} in {:.2} ms",
        result.operations.len(),
        path,
        result.processing_duration.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn render(result: &PipelineResult, format: Format) -> Result<String, String> {
    match format {
        Format::Json => PipelineOutput::new(result)
            .to_json()
            .map_err(|e| format!("error: cannot serialize commands: {}", e)),
        Format::Text => Ok(result
            .operations
            .iter()
            .map(|operation| operation.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
