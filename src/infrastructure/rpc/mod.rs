pub mod server;
pub mod types;

pub use server::handle_rpc;
pub use types::{RpcRequest, RpcResponse};
