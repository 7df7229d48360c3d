//! 班级查询
//!
//! 只读操作，直接使用连接池，不开启事务。

pub mod detail;
pub mod list;

pub use detail::get_class_detail;
pub use list::list_my_classes;
