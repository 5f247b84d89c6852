//! Client interface, builder, and the process-wide default client.

mod builder;
mod client;
mod default;
mod traits;

pub use builder::GenAiClientBuilder;
pub use client::{create_client, create_client_from_env, GenAiClientImpl};
pub use default::{configure, default_client, reset_default_client, set_default_client};
pub use traits::GenAiClient;
