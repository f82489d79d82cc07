//! # polyrtree - 多边形对象的 R-tree 空间索引
//!
//! 基于 Antonin Guttman 的论文 "R-trees: A Dynamic Index Structure for
//! Spatial Searching" 的 R-tree 实现，索引带多边形载荷的二维整数坐标
//! 轴对齐矩形。
//!
//! ## 主要特性
//!
//! - 插入、窗口查询、按值身份删除，以及按层提取边界矩形层次
//! - 二次分裂算法（Quadratic Split）处理节点溢出
//! - 删除下溢时整棵子树按原层级重插，而不是摊平到叶子层重建
//! - 可配置的最大/最小条目数
//! - 树结构的JSON导出，用于外部检查和可视化
//!
//! ## 使用示例
//!
//! ```rust
//! use polyrtree::{RTree, Rectangle};
//!
//! let mut rtree = RTree::new(8);
//!
//! // 多边形既是数据也是删除时的身份键
//! let triangle = vec![(0, 0), (4, 0), (2, 3)];
//! let mbr = Rectangle::from_points(&triangle);
//! rtree.insert(mbr.min, mbr.max, triangle.clone());
//!
//! let results = rtree.search(&Rectangle::new(-1, -1, 10, 10));
//! assert!(results.contains(&triangle));
//!
//! rtree.remove(mbr.min, mbr.max, &triangle);
//! assert_eq!(rtree.count(), 0);
//! ```

pub mod algorithms;
pub mod node;
pub mod rectangle;
pub mod rtree;

// 重新导出主要的公共接口
pub use node::{Entry, Node, Polygon};
pub use rectangle::{Rectangle, POINT_MARGIN};
pub use rtree::{ExportError, RTree, TreeVisualization};
