pub mod delete;
pub mod dispatch;
pub mod lab;
pub mod seed;
pub mod tree;
