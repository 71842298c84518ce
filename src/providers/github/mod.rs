mod client;
mod types;
mod url_utils;

pub use client::GitHubClient;
