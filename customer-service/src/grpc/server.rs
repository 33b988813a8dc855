//! gRPC server builder

use std::net::SocketAddr;
use std::time::Duration;

use tonic::transport::Server;

use crate::config::GrpcConfig;

// HTTP/2 bounds for SETTINGS_MAX_FRAME_SIZE
const MIN_FRAME_SIZE: u32 = 16_384;
const MAX_FRAME_SIZE: u32 = 16_777_215;

/// gRPC server builder
///
/// Applies the configured request timeout and frame size to a tonic
/// [`Server`].
#[derive(Debug, Clone)]
pub struct GrpcServer {
    config: GrpcConfig,
}

impl GrpcServer {
    pub fn new(config: GrpcConfig) -> Self {
        Self { config }
    }

    /// Build the tonic server
    pub fn build(&self) -> Server {
        Server::builder()
            .max_frame_size(Some(self.max_frame_size()))
            .timeout(self.config.timeout())
            .tcp_keepalive(Some(Duration::from_secs(60)))
    }

    /// Configured message size, clamped to what HTTP/2 allows for a frame
    fn max_frame_size(&self) -> u32 {
        u32::try_from(self.config.max_message_size_bytes())
            .unwrap_or(u32::MAX)
            .clamp(MIN_FRAME_SIZE, MAX_FRAME_SIZE)
    }

    /// Listen address on all interfaces
    pub fn socket_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_binds_all_interfaces() {
        let server = GrpcServer::new(GrpcConfig::default());
        assert_eq!(server.socket_addr(9090).to_string(), "0.0.0.0:9090");
    }

    #[test]
    fn test_frame_size_is_clamped() {
        let default = GrpcServer::new(GrpcConfig::default());
        assert_eq!(default.max_frame_size(), 4 * 1024 * 1024);

        let oversized = GrpcServer::new(GrpcConfig {
            max_message_size_mb: 64,
            ..GrpcConfig::default()
        });
        assert_eq!(oversized.max_frame_size(), MAX_FRAME_SIZE);
    }
}
