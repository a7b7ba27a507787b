//!  The `tracing` module provides functionalities for setting up and configuring logging.
//!
//!  Library crates of this workspace only emit events through [`tracing`] macros; installing a
//!  subscriber is left to the embedding application. [`ThorTracer`] is a ready made subscriber
//!  setup writing to stderr in either terminal or JSON format, and [`TestTracer`] is what the
//!  test suites install.
//!
//!  # Examples
//!
//!  Basic usage:
//!
//!  ```
//!  use thor_tracing::{
//!      LayerInfo, ThorTracer, Tracer,
//!      tracing::level_filters::LevelFilter,
//!      LogFormat,
//!  };
//!
//!  fn main() -> eyre::Result<()> {
//!      let tracer = ThorTracer::new().with_stderr(LayerInfo::new(
//!          LogFormat::Json,
//!          LevelFilter::INFO.to_string(),
//!          "thor::tx=trace".to_string(),
//!          None,
//!      ));
//!
//!      tracer.init()?;
//!
//!      // Your application logic here
//!
//!      Ok(())
//!  }
//!  ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-export tracing crates
pub use tracing;
pub use tracing_subscriber;

// Re-export our types
pub use formatter::LogFormat;
pub use test_tracer::TestTracer;

mod formatter;
mod test_tracer;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Directive, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

///  Tracer for application logging.
///
///  Manages the configuration and initialization of the stderr logging layer.
#[derive(Debug, Clone, Default)]
pub struct ThorTracer {
    stderr: LayerInfo,
}

impl ThorTracer {
    ///  Constructs a new `Tracer` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    ///  Sets a custom configuration for the stderr layer.
    ///
    ///  # Arguments
    ///  * `config` - The `LayerInfo` to use for the stderr layer.
    pub fn with_stderr(mut self, config: LayerInfo) -> Self {
        self.stderr = config;
        self
    }
}

///  Configuration for a logging layer.
///
///  This struct holds configuration parameters for a tracing layer, including
///  the format, filtering directives, optional coloring, and directive.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    ///  Constructs a new `LayerInfo`.
    ///
    ///  # Arguments
    ///  * `format` - Specifies the format for log messages. Possible values are:
    ///      - `LogFormat::Json` for JSON formatting.
    ///      - `LogFormat::Terminal` for human-readable, terminal-friendly formatting.
    ///  * `default_directive` - Directive for filtering log messages.
    ///  * `filters` - Additional comma separated filtering directives, e.g. `thor::tx=trace`.
    ///  * `color` - Optional color configuration for the log messages.
    pub const fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    ///  Provides default values for `LayerInfo`.
    ///
    ///  By default, it uses terminal format, INFO level filter,
    ///  no additional filters, and no color configuration.
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: None,
        }
    }
}

/// Trait defining a general interface for logging configuration.
///
/// The `Tracer` trait provides a standardized way to initialize logging configurations
/// in an application. Implementations of this trait can specify different logging setups,
/// such as formatted stderr logging or configurations tailored for specific environments
/// (like testing).
pub trait Tracer {
    /// Initialize the logging configuration.
    ///
    /// Returns an error if the configured directives cannot be parsed.
    fn init(self) -> eyre::Result<()>;
}

impl Tracer for ThorTracer {
    ///  Installs the global subscriber with the configured stderr layer.
    ///
    ///  `RUST_LOG`, when set, takes precedence over the default directive.
    fn init(self) -> eyre::Result<()> {
        let filter = build_env_filter(
            self.stderr.default_directive.parse()?,
            &self.stderr.filters,
        )?;
        let layer = self.stderr.format.apply(filter, self.stderr.color);

        // The error is returned if the global default subscriber is already set,
        // so it's safe to ignore it
        let _ = tracing_subscriber::registry().with(layer).try_init().inspect_err(|e| {
            tracing::warn!(%e, "Tracing subscriber could not be initialized.")
        });
        Ok(())
    }
}

/// Builds an [`EnvFilter`] from `RUST_LOG` and the given directives.
fn build_env_filter(default_directive: Directive, directives: &str) -> eyre::Result<EnvFilter> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();

    directives
        .split(',')
        .filter(|directive| !directive.is_empty())
        .try_fold(env_filter, |env_filter, directive| {
            Ok(env_filter.add_directive(directive.parse::<Directive>()?))
        })
}

///  Initializes a tracing subscriber for tests.
///
///  The filter is configurable via `RUST_LOG`.
///
///  # Note
///
///  The subscriber will silently fail if it could not be installed.
pub fn init_test_tracing() {
    let _ = TestTracer::default().init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_accepts_comma_separated_directives() {
        let filter = build_env_filter(LevelFilter::WARN.into(), "thor::tx=trace,,thor=debug");
        assert!(filter.is_ok());
    }

    #[test]
    fn env_filter_rejects_malformed_directive() {
        let filter = build_env_filter(LevelFilter::WARN.into(), "thor::tx=loud");
        assert!(filter.is_err());
    }
}
