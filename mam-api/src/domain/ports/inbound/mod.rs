mod hours;

pub use hours::*;
