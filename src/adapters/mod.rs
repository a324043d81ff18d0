pub mod http;
pub mod replay;
pub mod transport;
