pub mod credentials;
pub mod vehicles;
