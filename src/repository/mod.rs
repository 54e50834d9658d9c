pub mod employee;

#[cfg(test)]
pub mod memory;
