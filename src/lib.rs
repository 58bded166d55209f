pub mod hyperspectral;
pub mod logger;
