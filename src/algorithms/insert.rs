use crate::node::{Entry, Node, Polygon};
use crate::rectangle::Rectangle;
use crate::rtree::RTree;

/// 插入操作的递归结果
///
/// 以返回值显式向上传播"是否发生分裂"；分裂时携带新兄弟
/// 节点的所有权，由父节点决定挂接位置
pub(crate) enum InsertOutcome {
    /// 未分裂，祖先只需增量合并覆盖矩形
    NoSplit,
    /// 发生分裂，新兄弟节点需要挂到父节点上
    Split(Box<Node>),
}

/// 插入操作相关算法
impl RTree {
    /// 插入新的多边形对象 - 遵循论文Algorithm Insert
    ///
    /// 矩形由两个对角点构成；多边形同时作为数据和将来删除
    /// 时的身份键
    pub fn insert(&mut self, min: [i32; 2], max: [i32; 2], data: Polygon) {
        let mbr = Rectangle::from_corners(min, max);
        self.objs.push(data.clone());
        self.insert_at_level(Entry::Data { mbr, data }, 0);
    }

    /// 在指定层级插入条目，必要时增高树
    ///
    /// 普通插入的目标层级是0；删除操作重插孤儿节点的条目时
    /// 以孤儿自身的层级为目标，整棵子树原样挂回而不是摊平
    /// 到叶子层重建
    pub(crate) fn insert_at_level(&mut self, entry: Entry, level: usize) {
        debug_assert!(level <= self.root.level, "insert level above root");

        let max_entries = self.max_entries;
        let min_entries = self.min_entries;

        if let InsertOutcome::Split(sibling) =
            Self::insert_recursive(&mut self.root, entry, level, max_entries, min_entries)
        {
            // I4: 根节点分裂 - 创建高一层的新根，包含旧根和新兄弟
            // 两个条目。这是树高增长的唯一途径
            let new_level = self.root.level + 1;
            tracing::debug!(new_level, "root split, growing tree");

            let old_root =
                std::mem::replace(&mut self.root, Box::new(Node::new_index_node(new_level)));
            let branch = Entry::Node {
                mbr: old_root.cover(),
                node: old_root,
            };
            self.root.entries.push(branch);

            let branch = Entry::Node {
                mbr: sibling.cover(),
                node: sibling,
            };
            self.root.entries.push(branch);
        }
    }

    /// 递归下降插入 - 遵循论文Algorithm Insert的I1-I3步骤
    fn insert_recursive(
        node: &mut Node,
        entry: Entry,
        level: usize,
        max_entries: usize,
        min_entries: usize,
    ) -> InsertOutcome {
        if node.level > level {
            // I1: 还没到目标层级，选择扩大面积最小的子树下降
            let index = Self::choose_subtree(&node.entries, entry.mbr());
            let entry_mbr = *entry.mbr();

            let outcome = {
                let Entry::Node { node: child, .. } = &mut node.entries[index] else {
                    unreachable!("index node entry without child")
                };
                Self::insert_recursive(child, entry, level, max_entries, min_entries)
            };

            match outcome {
                InsertOutcome::NoSplit => {
                    // 子树未分裂：增量合并即可得到新的覆盖矩形
                    let merged = entry_mbr.union(node.entries[index].mbr());
                    *node.entries[index].mbr_mut() = merged;
                    InsertOutcome::NoSplit
                }
                InsertOutcome::Split(sibling) => {
                    // 子树分裂后内容已变，增量合并不再有效，重算完整覆盖
                    let cover = match &node.entries[index] {
                        Entry::Node { node: child, .. } => child.cover(),
                        Entry::Data { .. } => unreachable!("index node entry without child"),
                    };
                    *node.entries[index].mbr_mut() = cover;

                    // 新兄弟作为一个新条目挂入当前节点，可能引发连锁分裂
                    let branch = Entry::Node {
                        mbr: sibling.cover(),
                        node: sibling,
                    };
                    Self::add_entry(node, branch, max_entries, min_entries)
                }
            }
        } else if node.level == level {
            // I2: 到达目标层级，直接加入条目（容量耗尽时分裂）
            Self::add_entry(node, entry, max_entries, min_entries)
        } else {
            // 防御分支：平衡正确的树不可能下降到目标层级之下
            tracing::warn!(
                node_level = node.level,
                target_level = level,
                "insert descended below target level"
            );
            debug_assert!(false, "corrupted tree: node level below insert target");
            InsertOutcome::NoSplit
        }
    }

    /// 选择子树 - 遵循论文ChooseLeaf算法的CL3步骤
    ///
    /// 选择加入后面积扩大最小的条目；扩大量相同时选择自身
    /// 面积较小的条目；两者都相同时保留先出现的候选
    fn choose_subtree(entries: &[Entry], mbr: &Rectangle) -> usize {
        let mut best = 0;
        let mut best_enlargement = i64::MAX;
        let mut best_area = i64::MAX;

        for (index, entry) in entries.iter().enumerate() {
            let area = entry.mbr().area();
            let enlargement = entry.mbr().enlargement(mbr);

            if enlargement < best_enlargement
                || (enlargement == best_enlargement && area < best_area)
            {
                best = index;
                best_enlargement = enlargement;
                best_area = area;
            }
        }

        best
    }
}
