//! gRPC interceptors

use tonic::metadata::MetadataValue;
use tonic::{Request, Status};
use uuid::Uuid;

/// Metadata key carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID interceptor
///
/// Keeps a caller-supplied `x-request-id` or generates one, and writes it back
/// into the request metadata.
pub fn request_id_interceptor(mut req: Request<()>) -> Result<Request<()>, Status> {
    let request_id = req
        .metadata()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let value = MetadataValue::try_from(request_id.as_str())
        .map_err(|_| Status::internal("Failed to encode request ID"))?;
    req.metadata_mut().insert(REQUEST_ID_HEADER, value);

    tracing::debug!(request_id = %request_id, "gRPC request received");

    Ok(req)
}
