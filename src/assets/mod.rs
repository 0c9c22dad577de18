pub mod decode;
pub mod load;
