pub mod gateway;
pub mod http;

pub use gateway::GatewayImageGenerator;
pub use http::{GatewayHttpError, GatewayHttpErrorKind};
