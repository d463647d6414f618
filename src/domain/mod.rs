pub mod entities;
pub mod password;
pub mod sphere;
pub mod use_cases;
