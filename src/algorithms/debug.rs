use crate::node::{Entry, Node};
use crate::rtree::RTree;

/// R-tree调试与一致性检查
impl RTree {
    /// 打印完整的树结构用于调试
    ///
    /// 递归遍历整棵树，打印每个节点的层级、条目数和各条目的
    /// MBR，用于调试和人工检查
    #[allow(dead_code)]
    pub(crate) fn print_tree_structure(&self) {
        fn print_node(node: &Node, depth: usize) {
            let indent = "  ".repeat(depth);
            println!(
                "{}Node (level={}, {} entries)",
                indent,
                node.level,
                node.entries.len()
            );

            for (index, entry) in node.entries.iter().enumerate() {
                match entry {
                    Entry::Data { mbr, data } => {
                        println!(
                            "{}  [{}] Data: {} points at {}",
                            indent,
                            index,
                            data.len(),
                            mbr
                        );
                    }
                    Entry::Node { mbr, node: child } => {
                        println!("{}  [{}] Node: {} -> child:", indent, index, mbr);
                        print_node(child, depth + 1);
                    }
                }
            }
        }

        print_node(&self.root, 0);
    }

    /// 校验树的结构不变量，违反时panic
    ///
    /// - 索引条目的MBR等于其子节点所有条目MBR的精确并集
    /// - 子节点层级恰好比父节点小1，所有叶子都在第0层
    /// - 非根节点的条目数在[min_entries, max_entries]之间
    /// - 叶子节点只有数据条目，索引节点只有子节点条目
    #[allow(dead_code)]
    pub(crate) fn check_invariants(&self) {
        fn check_node(node: &Node, min_entries: usize, max_entries: usize, is_root: bool) {
            if !is_root {
                assert!(
                    node.entries.len() >= min_entries,
                    "node below minimum fill: {} < {}",
                    node.entries.len(),
                    min_entries
                );
            }
            assert!(
                node.entries.len() <= max_entries,
                "node above maximum fill: {} > {}",
                node.entries.len(),
                max_entries
            );

            for entry in &node.entries {
                match entry {
                    Entry::Data { .. } => {
                        assert!(node.is_leaf_node(), "data entry in index node");
                    }
                    Entry::Node { mbr, node: child } => {
                        assert!(node.is_index_node(), "child entry in leaf node");
                        assert_eq!(child.level + 1, node.level, "child level mismatch");
                        assert_eq!(*mbr, child.cover(), "stale cover rectangle");
                        check_node(child, min_entries, max_entries, false);
                    }
                }
            }
        }

        check_node(&self.root, self.min_entries, self.max_entries, true);
    }
}
