pub mod app_setting;
