pub mod nutrients;
pub mod pagination;

pub use nutrients::Nutrients;
pub use pagination::Pagination;
