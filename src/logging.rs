use env_logger::{Builder, Env, Target};
use gdal::errors::CplErrType;
use log::{debug, error, trace, warn, LevelFilter};

/// Environment variable overriding the verbosity flags.
pub const LOG_ENV: &str = "RIO_LOG";

/// Level for `verbose - quiet`; warnings are shown by default.
pub fn level_filter(verbosity: i8) -> LevelFilter {
    match verbosity {
        i8::MIN..=-2 => LevelFilter::Off,
        -1 => LevelFilter::Error,
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logs to stderr so stdout only carries command output.
pub fn init(verbosity: i8) {
    let env = Env::default().filter(LOG_ENV);
    let mut builder = Builder::new();
    builder
        .filter_level(level_filter(verbosity))
        .target(Target::Stderr)
        .format_timestamp(None)
        .parse_env(env);
    // A logger may already be installed when running under a test harness.
    let _ = builder.try_init();
    route_gdal_messages();
}

/// Sends gdal messages through `log` instead of gdal's own stderr printer.
///
/// Failures are only logged at debug level, they reach the caller as errors.
pub fn route_gdal_messages() {
    gdal::config::set_error_handler(|class, number, message| match class {
        CplErrType::Fatal => error!(target: "gdal", "{message} ({number})"),
        CplErrType::Failure => debug!(target: "gdal", "{message} ({number})"),
        CplErrType::Warning => warn!(target: "gdal", "{message}"),
        CplErrType::Debug | CplErrType::None => trace!(target: "gdal", "{message}"),
    });
}
