//! R-tree 核心算法实现
//!
//! 按论文的算法阶段划分模块：插入与子树选择、二次分裂、
//! 删除与下溢修复、搜索，外加层次提取与调试辅助

pub mod debug;
pub mod delete;
pub mod hierarchy;
pub mod insert;
pub mod search;
pub mod split;
