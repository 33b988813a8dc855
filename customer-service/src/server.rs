//! Process-level server wiring with graceful shutdown

use tokio::signal;
use tonic::service::interceptor::InterceptedService;

use crate::config::Config;
use crate::error::Result;
use crate::grpc::{request_id_interceptor, CustomerApi, CustomerServiceServer, GrpcServer};
use crate::storage::{CustomerStore, FeedbackStore};

/// Serve the customer API until SIGINT or SIGTERM
///
/// Registers the standard gRPC health service when `grpc.health` is enabled
/// and attaches the request ID interceptor to every call.
pub async fn serve<S>(config: &Config, api: CustomerApi<S>) -> Result<()>
where
    S: CustomerStore + FeedbackStore + 'static,
{
    let grpc = GrpcServer::new(config.grpc.clone());
    let addr = grpc.socket_addr(config.service.port);
    let max_message_size = config.grpc.max_message_size_bytes();

    let customer_service = CustomerServiceServer::new(api)
        .max_decoding_message_size(max_message_size)
        .max_encoding_message_size(max_message_size);

    let health_service = if config.grpc.health {
        let (reporter, service) = tonic_health::server::health_reporter();
        reporter
            .set_serving::<CustomerServiceServer<CustomerApi<S>>>()
            .await;
        Some(service)
    } else {
        None
    };

    tracing::info!(
        service = %config.service.name,
        environment = %config.service.environment,
        health = config.grpc.health,
        "Starting gRPC server on {}",
        addr
    );

    grpc.build()
        .add_optional_service(health_service)
        .add_service(InterceptedService::new(customer_service, request_id_interceptor))
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal
///
/// A handler that fails to install is logged and never fires, leaving the
/// other signal in charge.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}
