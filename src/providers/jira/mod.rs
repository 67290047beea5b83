mod client;
mod provider;

pub use client::DEFAULT_PAGE_SIZE;
pub use provider::JiraProvider;
