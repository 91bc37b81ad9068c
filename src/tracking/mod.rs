pub mod client;
pub mod response_structs;
