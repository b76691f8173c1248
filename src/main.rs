#![deny(missing_debug_implementations)]

mod emitter;
mod types;

use std::{
    env,
    fs::create_dir_all,
    io::{self, Read},
    sync::Arc,
};

use eyre::Result;
use lazy_static::lazy_static;
use tracing::{error, info};
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::{emitter::ProgressEmitter, types::ProgressRecord};

lazy_static! {
    /// Various constants used in the root application code
    pub(crate) static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    /// Various constants used in the root application code
    pub(crate) static ref LOG_ENV: String = format!("{}_LOG", PROJECT_NAME.clone());
    /// Various constants used in the root application code
    pub(crate) static ref LOG_FILE_ENV: String = format!("{}_LOG_FILE", PROJECT_NAME.clone());
}

fn initialise_logging() -> Result<()> {
    let now = chrono::offset::Local::now();
    let filter = match env::var(LOG_ENV.as_str()) {
        Ok(log) => Some(log),
        Err(_) => return Ok(()),
    };
    let path = env::var(LOG_FILE_ENV.as_str())
        .unwrap_or_else(|_| "taskpulse-log-${datetime}.log".to_string())
        .replace("${timestamp}", &now.timestamp().to_string())
        .replace("${datetime}", &now.format("%Y%m%d%H%M%S").to_string());

    let path = std::path::Path::new(&path);
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let log_file = std::fs::File::create(path)?;

    let var_name = EnvFilter::default();
    let filter = filter.map_or(var_name, EnvFilter::new);
    let writer = BoxMakeWriter::new(Arc::new(log_file));

    // Logs go to a file, never stdout: consumers frame raw JSON documents
    // off that stream.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(writer)
        .with_target(true)
        .with_ansi(true);

    Registry::default().with(filter).with(fmt_layer).init();

    Ok(())
}

fn initialise_panic_handler() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .capture_span_trace_by_default(true)
        .display_location_section(true)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;
    std::panic::set_hook(Box::new(move |panic_info| {
        let msg = format!("{}", panic_hook.panic_report(panic_info));
        eprintln!("{}", msg);
        error!("Error: {}", msg);

        std::process::exit(1);
    }));

    Ok(())
}

fn do_main() -> Result<()> {
    info!("Starting taskpulse");

    // Blocks until the supervisor closes our stdin, nothing is emitted
    // before the whole record has arrived.
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    let mut record = ProgressRecord::from_json_str(&input)?;
    info!("Initial progress: {:?}", record.progress());

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    ProgressEmitter::default().run(&mut record, &mut stdout)?;

    info!("Finished emitting updates");

    Ok(())
}

fn main() -> Result<()> {
    initialise_logging()?;
    initialise_panic_handler()?;

    do_main()
}
