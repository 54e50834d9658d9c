pub mod employee;
pub mod paging;
