pub mod health_data;
