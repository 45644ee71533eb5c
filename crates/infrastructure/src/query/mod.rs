mod client;
mod retry;

pub use client::KeyedQueryClient;
pub use retry::RetryPolicy;
