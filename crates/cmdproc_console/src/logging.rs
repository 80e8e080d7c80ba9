use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Installs the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init_subscriber(config: &LoggingConfig, color: bool) {
    build_subscriber(config, color, std::io::stderr).init();
}

fn build_subscriber<W>(
    config: &LoggingConfig,
    color: bool,
    writer: W,
) -> impl Subscriber + Send + Sync + use<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_level(true)
        .with_ansi(color)
        .with_target(config.show_target)
        .with_writer(writer);

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_no_color_disables_ansi() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = build_subscriber(&LoggingConfig::default(), false, move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(log_type = "console", "plain output");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("plain output"));
        assert!(!output.contains('\u{1b}'));
    }
}
