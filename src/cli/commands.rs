pub mod generate_data;
pub mod serve;

pub use generate_data::generate_data;
pub use serve::serve;
