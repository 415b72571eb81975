pub mod check;
pub mod cli;
pub mod credentials;
pub mod error;
pub mod queries;
pub mod settings;
pub mod tls;
pub mod verdict;
