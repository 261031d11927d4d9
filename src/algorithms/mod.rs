pub mod a_star;
pub mod open_set;
