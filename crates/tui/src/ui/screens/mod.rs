pub mod home;
pub mod placeholder;
pub mod settings;
pub mod settings_login;
