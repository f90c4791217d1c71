//! CLI entrypoint for meshtastic-oneshot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use oneshot_application::{
    ApplyConfigError, ApplyConfigInput, ApplyConfigUseCase, DeviceToolPort, ExecutionParams,
    InvocationLogger, ListPortsUseCase, NoInvocationLogger, NoProgress, ProbeDeviceUseCase,
    ProgressNotifier,
};
use oneshot_domain::{DeviceIdentity, DomainError, OutputFormat, PortRef, PortSelection};
use oneshot_infrastructure::{
    ConfigLoader, ConfigValidationError, FileConfig, JsonlInvocationLogger, ProcessDeviceTool,
    SerialPortEnumerator,
};
use oneshot_presentation::{
    ApplyArgs, Cli, Command, OutputConfig, OutputFormatter, PortsArgs, ProbeArgs,
    ProgressReporter, SimpleProgress, formatter_for,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit code after Ctrl-C, as shells report SIGINT
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr through a background writer; the guard flushes on return
    let (log_writer, _log_guard) = tracing_appender::non_blocking(std::io::stderr());

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(log_writer)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command.clone() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    info!("Starting meshtastic-oneshot");

    // === Configuration ===
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(ConfigValidationError::from)?
    };
    for issue in file_config.ensure_valid()? {
        warn!("{}", issue.message);
    }

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        cli.quiet,
        file_config.output.format,
        file_config.output.color,
    );
    output.apply_color();

    // === Dependency Injection ===
    let tool = Arc::new(file_config.tool.to_device_tool());
    let logger = invocation_logger(&cli);
    let cancel = cancel_on_ctrl_c();

    let app = App {
        formatter: formatter_for(output.format),
        progress: progress_notifier(&output),
        format: output.format,
        config: file_config,
        tool,
        logger,
        cancel,
    };

    let code = match command {
        Command::Ports(args) => app.ports(args),
        Command::Defaults => app.defaults(),
        Command::Probe(args) => app.probe(args).await,
        Command::Apply(args) => app.apply(args).await,
    };
    Ok(code)
}

/// Wired dependencies for one command
struct App {
    formatter: Box<dyn OutputFormatter>,
    progress: Box<dyn ProgressNotifier>,
    format: OutputFormat,
    config: FileConfig,
    tool: Arc<ProcessDeviceTool>,
    logger: Arc<dyn InvocationLogger>,
    cancel: CancellationToken,
}

impl App {
    fn list_ports(&self, usb_only: bool) -> PortSelection {
        let enumerator = if usb_only {
            SerialPortEnumerator::new().usb_only()
        } else {
            SerialPortEnumerator::new()
        };
        ListPortsUseCase::new(Arc::new(enumerator)).execute()
    }

    /// Requested port, or the first one found
    ///
    /// Fails without spawning anything when no port was given and none exist.
    fn resolve_port(&self, requested: Option<&str>) -> Result<PortRef, DomainError> {
        let selection = match requested {
            Some(_) => PortSelection::empty(),
            None => self.list_ports(false),
        };
        selection.resolve(requested).inspect_err(|e| {
            if e.is_placeholder() {
                warn!("No serial ports found; connect a device or pass --port");
            }
        })
    }

    fn warn_if_tool_missing(&self) {
        if !self.tool.is_available() {
            warn!(
                "'{}' was not found on PATH; install it with `pip install meshtastic`",
                self.tool.command()
            );
        }
    }

    fn ports(&self, args: PortsArgs) -> ExitCode {
        print!("{}", self.formatter.ports(&self.list_ports(args.usb_only)));
        ExitCode::SUCCESS
    }

    fn defaults(&self) -> ExitCode {
        let (identity, _) = self.config.identity.to_identity();
        print!(
            "{}",
            self.formatter
                .defaults(&identity, &self.config.device, self.tool.program())
        );
        ExitCode::SUCCESS
    }

    async fn probe(&self, args: ProbeArgs) -> ExitCode {
        self.warn_if_tool_missing();
        let port = match self.resolve_port(args.port.as_deref()) {
            Ok(port) => port,
            Err(e) => {
                eprintln!("Invalid target: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let timeout = args
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(self.config.timeouts.probe_timeout());

        let use_case = ProbeDeviceUseCase::new(Arc::clone(&self.tool))
            .with_timeout(timeout)
            .with_cancellation(self.cancel.clone())
            .with_logger(Arc::clone(&self.logger));

        match use_case
            .execute_with_progress(port.as_str(), self.progress.as_ref())
            .await
        {
            Ok(outcome) => {
                print!("{}", self.formatter.probe(port.as_str(), &outcome));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                if self.cancel.is_cancelled() {
                    ExitCode::from(EXIT_INTERRUPTED)
                } else {
                    ExitCode::FAILURE
                }
            }
        }
    }

    async fn apply(&self, args: ApplyArgs) -> ExitCode {
        self.warn_if_tool_missing();
        let params = self.apply_params(&args);
        let (defaults, _) = self.config.identity.to_identity();
        let identity = DeviceIdentity::new(
            args.long_name.unwrap_or(defaults.long_name),
            args.short_name.unwrap_or(defaults.short_name),
        );
        let port = match self.resolve_port(args.port.as_deref()) {
            Ok(port) => port,
            Err(e) => return self.apply_failed(ApplyConfigError::InvalidTarget(e)),
        };

        let input = ApplyConfigInput::from_identity(&identity, port)
            .with_settings(self.config.device.clone());
        let use_case = ApplyConfigUseCase::new(Arc::clone(&self.tool))
            .with_params(params)
            .with_cancellation(self.cancel.clone())
            .with_logger(Arc::clone(&self.logger));

        match use_case
            .execute_with_progress(input, self.progress.as_ref())
            .await
        {
            Ok(report) => {
                print!("{}", self.formatter.apply(&report));
                ExitCode::SUCCESS
            }
            Err(e) => self.apply_failed(e),
        }
    }

    fn apply_failed(&self, error: ApplyConfigError) -> ExitCode {
        let rendered = self.formatter.apply_error(&error);
        match self.format {
            OutputFormat::Json => print!("{}", rendered),
            OutputFormat::Text => eprint!("{}", rendered),
        }
        if error.is_cancelled() {
            ExitCode::from(EXIT_INTERRUPTED)
        } else {
            ExitCode::FAILURE
        }
    }

    /// Config file parameters with command-line overrides
    fn apply_params(&self, args: &ApplyArgs) -> ExecutionParams {
        let mut params = self.config.to_execution_params();
        if args.reapply_url {
            params = params.with_reapply_url(true);
        }
        if args.verify {
            params = params.with_verify(true);
        }
        if let Some(secs) = args.timeout {
            params = params.with_apply_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }
        params
    }
}

fn invocation_logger(cli: &Cli) -> Arc<dyn InvocationLogger> {
    match cli.log_file.as_ref().and_then(JsonlInvocationLogger::new) {
        Some(logger) => {
            info!("Recording tool runs to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoInvocationLogger),
    }
}

fn progress_notifier(output: &OutputConfig) -> Box<dyn ProgressNotifier> {
    if !output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

/// Token cancelled on the first Ctrl-C; the running tool is killed
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping the configuration tool");
            trigger.cancel();
        }
    });
    token
}
