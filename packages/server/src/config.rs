//! Server configuration.

use std::time::Duration;

use sigroom_shared::random::DEFAULT_ID_LENGTH;
use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("heartbeat timeout ({timeout:?}) must be shorter than the interval ({interval:?})")]
    HeartbeatTimeoutTooLong {
        interval: Duration,
        timeout: Duration,
    },

    #[error("heartbeat interval must be non-zero")]
    ZeroHeartbeatInterval,
}

/// Heartbeat timing for every connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Time between two `ping` frames.
    pub interval: Duration,
    /// How long a `pong` may take before the socket is closed.
    pub timeout: Duration,
}

impl HeartbeatConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    /// A pong must be due before the next ping goes out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroHeartbeatInterval);
        }
        if self.timeout >= self.interval {
            return Err(ConfigError::HeartbeatTimeoutTooLong {
                interval: self.interval,
                timeout: self.timeout,
            });
        }
        Ok(())
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}

/// Everything the server needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub heartbeat: HeartbeatConfig,
    /// Where `GET /` redirects to.
    pub top_redirect: String,
    /// Length of generated room and client ids.
    pub id_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            heartbeat: HeartbeatConfig::default(),
            top_redirect: "https://github.com/".to_string(),
            id_length: DEFAULT_ID_LENGTH,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_heartbeat_is_valid() {
        // テスト項目: デフォルトのハートビート設定は有効
        assert_eq!(HeartbeatConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_timeout_not_shorter_than_interval_is_rejected() {
        // テスト項目: timeout が interval 以上の設定は拒否される
        // given (前提条件):
        let interval = Duration::from_secs(1);

        // when (操作) / then (期待する結果):
        for timeout in [Duration::from_secs(1), Duration::from_secs(3)] {
            assert_eq!(
                HeartbeatConfig { interval, timeout }.validate(),
                Err(ConfigError::HeartbeatTimeoutTooLong { interval, timeout })
            );
        }
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        // テスト項目: interval が 0 の設定は拒否される
        let heartbeat = HeartbeatConfig {
            interval: Duration::ZERO,
            timeout: Duration::ZERO,
        };

        assert_eq!(heartbeat.validate(), Err(ConfigError::ZeroHeartbeatInterval));
    }
}
