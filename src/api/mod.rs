pub mod employee;
pub mod forms;
