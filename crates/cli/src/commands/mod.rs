pub mod info;
pub mod migrate;
