use pollwait::config::{CommandSection, RawConfigFile};
use pollwait::types::PollMode;

/// Builder for `RawConfigFile` used in tests.
#[derive(Debug, Default)]
pub struct RawConfigBuilder {
    cfg: RawConfigFile,
}

impl RawConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: PollMode) -> Self {
        self.cfg.poll.mode = mode;
        self
    }

    pub fn interval(mut self, interval: &str) -> Self {
        self.cfg.poll.interval = interval.to_string();
        self
    }

    pub fn timeout(mut self, timeout: &str) -> Self {
        self.cfg.poll.timeout = Some(timeout.to_string());
        self
    }

    pub fn cmd(mut self, cmd: &str) -> Self {
        self.cfg.command = Some(CommandSection {
            cmd: cmd.to_string(),
        });
        self
    }

    pub fn build(self) -> RawConfigFile {
        self.cfg
    }
}
