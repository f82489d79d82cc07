use crate::node::Entry;
use crate::rectangle::Rectangle;
use crate::rtree::RTree;

/// 层次结构提取 - 用于诊断和可视化
impl RTree {
    /// 按层输出树中每个条目的MBR，根层在前
    ///
    /// 逐层广度优先：先输出当前层所有条目的矩形，再展开层级
    /// 恰好低一层的子节点（对畸形层级的防御检查）；
    /// 空树返回空列表
    pub fn mbr_hierarchy(&self) -> Vec<Vec<Rectangle>> {
        let mut levels = Vec::new();
        if self.root.entries.is_empty() {
            return levels;
        }

        let mut current: Vec<&Entry> = self.root.entries.iter().collect();
        let mut current_level = self.root.level;

        while !current.is_empty() {
            let mut mbrs = Vec::with_capacity(current.len());
            let mut next = Vec::new();

            for entry in current {
                mbrs.push(*entry.mbr());

                if current_level > 0 {
                    if let Entry::Node { node: child, .. } = entry {
                        if child.level == current_level - 1 {
                            next.extend(child.entries.iter());
                        }
                    }
                }
            }

            levels.push(mbrs);
            current = next;
            current_level = current_level.saturating_sub(1);
        }

        levels
    }
}
