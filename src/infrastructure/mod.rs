pub mod analysis;
pub mod edgar;
pub mod extract;
pub mod feeds;
pub mod http;
pub mod lake;
pub mod sqlite;
