pub mod employee;
pub mod insert;
