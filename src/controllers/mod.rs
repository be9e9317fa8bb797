pub mod audio;
pub mod conversion;
pub mod desktop_app;
pub mod health;
pub mod page;
