mod hours;

pub use hours::HoursServiceImpl;
