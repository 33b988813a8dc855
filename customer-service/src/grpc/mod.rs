//! gRPC transport for the customer service
//!
//! [`CustomerApi`] adapts the generated `customer.v1.CustomerService` trait to
//! [`CustomerService`](crate::service::CustomerService). Domain failures are
//! always returned inside the response's `error` field; a `tonic::Status` is
//! reserved for transport-level problems.
//!
//! ## Example
//!
//! ```ignore
//! use customer_service::grpc::{request_id_interceptor, CustomerApi, CustomerServiceServer};
//!
//! let api = CustomerApi::new(service);
//! Server::builder()
//!     .add_service(CustomerServiceServer::with_interceptor(api, request_id_interceptor))
//!     .serve(addr)
//!     .await?;
//! ```

/// Generated protobuf types for `customer.v1`
pub mod pb {
    tonic::include_proto!("customer.v1");
}

mod api;
mod convert;
mod customer;
mod feedback;

pub mod interceptors;
pub mod server;

pub use api::CustomerApi;
pub use interceptors::request_id_interceptor;
pub use pb::customer_service_server::CustomerServiceServer;
pub use server::GrpcServer;
