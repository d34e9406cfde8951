mod client;

pub use client::KarbonClient;
