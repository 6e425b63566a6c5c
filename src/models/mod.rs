pub mod day_record;
pub mod settings;
pub mod window;
