use tracing::info;

/// Route changes requested by the store.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);

    /// Full reload, requested after logout.
    fn reload(&self);
}

/// Navigator for headless use: records the request in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "navigate");
    }

    fn reload(&self) {
        info!("reload");
    }
}
