pub mod health;
pub mod tenant;
