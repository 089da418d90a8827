// In: src/utils.rs

use std::fs::OpenOptions;
use std::sync::Once;

use log::LevelFilter;

static INIT_LOGGER: Once = Once::new();

/// Turns on verbose engine logging, optionally piped to a file.
///
/// Safe to call more than once; only the first call configures the logger.
pub fn enable_verbose_logging(log_file: Option<String>) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Trace);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(filename) = log_file {
            let file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(filename)
                .expect("Could not open log file in append mode");
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
}
