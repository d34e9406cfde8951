pub mod karbon;
pub mod rpc;
pub mod server;
