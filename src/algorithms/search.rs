use crate::node::{Entry, Node, Polygon};
use crate::rectangle::Rectangle;
use crate::rtree::RTree;

/// 搜索操作相关算法
impl RTree {
    /// 窗口查询 - 遵循论文Algorithm Search
    ///
    /// 返回所有MBR与查询矩形相交的多边形，边界接触也算命中；
    /// 查询落空时返回空列表，结果顺序不保证
    pub fn search(&self, query: &Rectangle) -> Vec<Polygon> {
        let mut results = Vec::new();
        Self::search_recursive(&self.root, query, &mut results);
        results
    }

    /// 递归搜索 - S1下降重叠的子树，S2收集叶子层命中
    fn search_recursive(node: &Node, query: &Rectangle, results: &mut Vec<Polygon>) {
        for entry in &node.entries {
            if entry.mbr().intersects(query) {
                match entry {
                    Entry::Data { data, .. } => {
                        results.push(data.clone());
                    }
                    Entry::Node { node: child, .. } => {
                        Self::search_recursive(child, query, results);
                    }
                }
            }
        }
    }
}
