//! Logging Infrastructure
//!
//! Structured logging for development and production.
//!
//! - Console output, pretty or JSON
//! - Daily rotating application logs under `<log_dir>/app` (pruned after [`APP_LOG_RETENTION_DAYS`])
//! - Audit logs under `<log_dir>/audit` (target `audit`, never pruned)
//! - Security logs under `<log_dir>/security` (target `security`, never pruned)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Days an application log file is kept
pub const APP_LOG_RETENTION_DAYS: i64 = 14;

const APP_PREFIX: &str = "app";
const AUDIT_TARGET: &str = "audit";
const SECURITY_TARGET: &str = "security";

type Base = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Base> + Send + Sync>;

/// Initialize the logging system
///
/// `RUST_LOG` overrides `level` when set. With `log_dir` the three rotating
/// file sinks are added and an hourly cleanup task is spawned, so this must
/// run inside a tokio runtime in that case.
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// sales_server::utils::logger::init_logger("debug", false, None)?;
///
/// // Production setup (console + file)
/// sales_server::utils::logger::init_logger("info", true, Some("./data/logs".as_ref()))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers: Vec<BoxedLayer> = vec![console_layer(json_format)];

    if let Some(dir) = log_dir {
        let app_dir = dir.join(APP_PREFIX);
        let audit_dir = dir.join(AUDIT_TARGET);
        let security_dir = dir.join(SECURITY_TARGET);
        for sub in [&app_dir, &audit_dir, &security_dir] {
            fs::create_dir_all(sub)?;
        }

        layers.push(file_layer(&app_dir, APP_PREFIX, json_format, |target| {
            target != AUDIT_TARGET && target != SECURITY_TARGET
        }));
        layers.push(file_layer(&audit_dir, AUDIT_TARGET, json_format, |target| {
            target == AUDIT_TARGET
        }));
        layers.push(file_layer(
            &security_dir,
            SECURITY_TARGET,
            json_format,
            |target| target == SECURITY_TARGET,
        ));

        tokio::spawn(periodic_cleanup(dir.to_path_buf()));
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

fn console_layer(json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    }
}

fn file_layer(dir: &Path, prefix: &str, json_format: bool, keep: fn(&str) -> bool) -> BoxedLayer {
    let writer = std::sync::Mutex::new(RollingFileAppender::new(Rotation::DAILY, dir, prefix));
    let filter = filter_fn(move |meta| keep(meta.target()));
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    }
}

/// Delete application log files older than the retention window
///
/// Daily rotation names files `app.YYYY-MM-DD`; anything else in the
/// directory is left alone. Returns the number of removed files.
pub fn cleanup_old_logs(log_dir: &Path, today: NaiveDate) -> anyhow::Result<usize> {
    let app_dir = log_dir.join(APP_PREFIX);
    if !app_dir.exists() {
        return Ok(0);
    }

    let cutoff = today - Duration::days(APP_LOG_RETENTION_DAYS);
    let mut removed = 0;
    for entry in fs::read_dir(app_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date) = name
            .strip_prefix("app.")
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        else {
            continue;
        };
        if date < cutoff {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }
    Ok(removed)
}

/// Runs every hour
async fn periodic_cleanup(log_dir: PathBuf) {
    use tokio::time::{Duration, sleep};

    loop {
        sleep(Duration::from_secs(3600)).await;

        if let Err(e) = cleanup_old_logs(&log_dir, Local::now().date_naive()) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}


/// Audit log helper for business mutations
///
/// Written under the `audit` target, which lands in the permanent audit sink.
///
/// # Examples
/// ```ignore
/// audit_log!("admin", "delete", "tenant:3");
/// audit_log!("tenantA", "create", "sales:42", "2024-03 150000");
/// ```
#[macro_export]
macro_rules! audit_log {
    ($user_id:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            user_id = %$user_id,
            action = $action,
            resource = %$resource,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($user_id:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            user_id = %$user_id,
            action = $action,
            resource = %$resource,
            details = %$details,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

/// Security log helper for authentication and authorization events
///
/// # Examples
/// ```ignore
/// security_log!(WARN, "login_failed", user_id = %id, reason = "invalid_credentials");
/// security_log!(INFO, "login_success", user_id = %id);
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (ERROR, $event:expr, $($arg:tt)*) => {
        tracing::error!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(
            target: "security",
            event = $event,
            timestamp = %chrono::Local::now().to_rfc3339(),
            $($arg)*
        );
    };
}
