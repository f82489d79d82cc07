use crate::node::{Entry, Node, Polygon};
use crate::rectangle::Rectangle;
use crate::rtree::RTree;

/// R-tree删除算法实现
impl RTree {
    /// 删除指定的多边形对象 - 遵循论文Algorithm Delete
    ///
    /// 按矩形剪枝下降，按多边形的值相等确定身份；
    /// 找不到匹配对象时静默返回，树保持不变
    pub fn remove(&mut self, min: [i32; 2], max: [i32; 2], data: &Polygon) {
        let rect = Rectangle::from_corners(min, max);
        self.remove_rect(&rect, data);
    }

    /// 删除与矩形和身份键匹配的条目并修复下溢
    fn remove_rect(&mut self, rect: &Rectangle, id: &Polygon) {
        let min_entries = self.min_entries;

        // D1-D2: 递归定位并删除，沿途把下溢的节点整个从父节点
        // 摘下来挂入重插队列；队列在递归完全返回后才排空，
        // 下降过程中重插会破坏正在进行的遍历
        let mut reinsert: Vec<Box<Node>> = Vec::new();
        let found = Self::delete_recursive(
            &mut self.root,
            rect,
            id,
            min_entries,
            &mut reinsert,
            &mut self.objs,
        );
        if !found {
            return;
        }

        // D3: 排空重插队列 - 孤儿节点的每个条目按孤儿自身的层级
        // 重插：孤儿是索引节点时挂回的是整棵子树而不是叶子数据，
        // 重插本身可能再次引发连锁分裂
        for orphan in reinsert {
            let orphan = *orphan;
            let level = orphan.level;
            let entry_count = orphan.entries.len();
            tracing::debug!(level, entry_count, "reinserting entries of under-filled node");

            for entry in orphan.entries {
                self.insert_at_level(entry, level);
            }
        }

        // D4: 根节点是只剩一个条目的索引节点时，提升其唯一子节点
        // 为新根，树高减一
        if self.root.is_index_node() && self.root.entries.len() == 1 {
            let Some(Entry::Node { node, .. }) = self.root.entries.pop() else {
                unreachable!("index node entry without child")
            };
            tracing::debug!(new_level = node.level, "collapsing root with single entry");
            self.root = node;
        }

        // 所有条目都被摘除的索引根退化为空的叶子根，
        // 与新建的空树处于同一状态
        if self.root.is_index_node() && self.root.entries.is_empty() {
            self.root = Box::new(Node::new_leaf_node());
        }
    }

    /// 递归删除
    ///
    /// 返回是否在该子树中找到并删除了目标。身份键全局唯一，
    /// 第一处命中即向上传播"已处理"信号，同层的其余兄弟不再
    /// 扫描
    fn delete_recursive(
        node: &mut Node,
        rect: &Rectangle,
        id: &Polygon,
        min_entries: usize,
        reinsert: &mut Vec<Box<Node>>,
        objs: &mut Vec<Polygon>,
    ) -> bool {
        if node.is_index_node() {
            let mut index = 0;
            while index < node.entries.len() {
                if rect.intersects(node.entries[index].mbr()) {
                    let found = {
                        let Entry::Node { node: child, .. } = &mut node.entries[index] else {
                            unreachable!("index node entry without child")
                        };
                        Self::delete_recursive(child, rect, id, min_entries, reinsert, objs)
                    };

                    if found {
                        // 删除发生在这棵子树里：检查子节点的填充度
                        let refreshed_cover = {
                            let Entry::Node { node: child, .. } = &node.entries[index] else {
                                unreachable!("index node entry without child")
                            };
                            if child.entries.len() >= min_entries {
                                Some(child.cover())
                            } else {
                                None
                            }
                        };

                        match refreshed_cover {
                            Some(cover) => {
                                // 仍满足最小填充，只需刷新覆盖矩形
                                *node.entries[index].mbr_mut() = cover;
                            }
                            None => {
                                // 下溢：子节点整个从父节点摘除，其条目
                                // 留待顶层重插
                                let Entry::Node { node: orphan, .. } =
                                    node.entries.swap_remove(index)
                                else {
                                    unreachable!("index node entry without child")
                                };
                                reinsert.push(orphan);
                            }
                        }
                        return true;
                    }
                }
                index += 1;
            }
            false
        } else {
            for index in 0..node.entries.len() {
                let matched =
                    matches!(&node.entries[index], Entry::Data { data, .. } if data == id);
                if matched {
                    // 平铺镜像中抹掉第一个值相等的多边形
                    if let Some(position) = objs.iter().position(|obj| obj == id) {
                        objs.remove(position);
                    }
                    // 与末尾条目交换后截断，复用空出的槽位；
                    // 节点内的条目顺序因此不保证稳定
                    node.entries.swap_remove(index);
                    return true;
                }
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_polygon(rtree: &mut RTree, polygon: &Polygon) {
        let mbr = Rectangle::from_points(polygon);
        rtree.insert(mbr.min, mbr.max, polygon.clone());
    }

    fn remove_polygon(rtree: &mut RTree, polygon: &Polygon) {
        let mbr = Rectangle::from_points(polygon);
        rtree.remove(mbr.min, mbr.max, polygon);
    }

    #[test]
    fn test_remove_basic() {
        let mut rtree = RTree::new(4);

        let polygon1 = vec![(0, 0), (10, 10)];
        let polygon2 = vec![(5, 5), (15, 15)];
        let polygon3 = vec![(20, 20), (30, 30)];
        insert_polygon(&mut rtree, &polygon1);
        insert_polygon(&mut rtree, &polygon2);
        insert_polygon(&mut rtree, &polygon3);

        remove_polygon(&mut rtree, &polygon2);
        assert_eq!(rtree.count(), 2);

        let results = rtree.search(&Rectangle::new(0, 0, 30, 30));
        assert!(results.contains(&polygon1));
        assert!(!results.contains(&polygon2));
        assert!(results.contains(&polygon3));
        assert!(!rtree.objects().contains(&polygon2));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut rtree = RTree::new(4);
        let polygon = vec![(0, 0), (10, 10)];
        insert_polygon(&mut rtree, &polygon);

        // 不存在的对象：矩形相同但顶点序列不同
        let missing = vec![(0, 0), (10, 10), (0, 10)];
        rtree.remove([0, 0], [10, 10], &missing);

        assert_eq!(rtree.count(), 1);
        assert!(rtree.objects().contains(&polygon));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut rtree = RTree::new(4);
        let keep = vec![(50, 50), (60, 60)];
        let target = vec![(0, 0), (10, 10)];
        insert_polygon(&mut rtree, &keep);
        insert_polygon(&mut rtree, &target);

        remove_polygon(&mut rtree, &target);
        let count_after_first = rtree.count();
        let hierarchy_after_first = rtree.mbr_hierarchy();
        let objects_after_first = rtree.objects();

        // 第二次删除同一个对象是空操作，树结构不变
        remove_polygon(&mut rtree, &target);
        assert_eq!(rtree.count(), count_after_first);
        assert_eq!(rtree.mbr_hierarchy(), hierarchy_after_first);
        assert_eq!(rtree.objects(), objects_after_first);
    }

    #[test]
    fn test_insert_then_remove_restores_state() {
        let mut rtree = RTree::new(4);
        for i in 0..5 {
            insert_polygon(&mut rtree, &vec![(i * 10, 0), (i * 10 + 3, 3)]);
        }
        let count_before = rtree.count();

        let transient = vec![(100, 100), (105, 105)];
        insert_polygon(&mut rtree, &transient);
        remove_polygon(&mut rtree, &transient);

        assert_eq!(rtree.count(), count_before);
        assert!(!rtree.objects().contains(&transient));
        rtree.check_invariants();
    }

    #[test]
    fn test_remove_distinguishes_identical_mbrs() {
        // MBR完全相同但顶点序列不同的两个对象按值身份区分
        let mut rtree = RTree::new(4);
        let triangle1 = vec![(0, 0), (10, 0), (10, 10)];
        let triangle2 = vec![(0, 0), (0, 10), (10, 10)];
        rtree.insert([0, 0], [10, 10], triangle1.clone());
        rtree.insert([0, 0], [10, 10], triangle2.clone());

        rtree.remove([0, 0], [10, 10], &triangle1);

        let results = rtree.search(&Rectangle::new(0, 0, 10, 10));
        assert!(!results.contains(&triangle1));
        assert!(results.contains(&triangle2));
    }

    #[test]
    fn test_remove_triggers_underflow_repair() {
        let mut rtree = RTree::new(4); // m = 2
        let mut polygons = Vec::new();

        // 两个相距很远的簇，保证形成多个叶子
        for i in 0..6 {
            polygons.push(vec![(i * 2, 0), (i * 2 + 1, 1)]);
        }
        for i in 0..6 {
            polygons.push(vec![(1000 + i * 2, 0), (1000 + i * 2 + 1, 1)]);
        }
        for polygon in &polygons {
            insert_polygon(&mut rtree, polygon);
        }
        rtree.check_invariants();

        // 逐个删除一个簇，沿途触发下溢修复
        for polygon in &polygons[..6] {
            remove_polygon(&mut rtree, polygon);
            rtree.check_invariants();
        }

        assert_eq!(rtree.count(), 6);
        let results = rtree.search(&Rectangle::new(0, 0, 5000, 5000));
        assert_eq!(results.len(), 6);
        for polygon in &polygons[6..] {
            assert!(results.contains(polygon));
        }
    }

    #[test]
    fn test_remove_shrinks_tree() {
        let mut rtree = RTree::new(2);
        let mut polygons = Vec::new();
        for i in 0..16 {
            polygons.push(vec![(i * 10, 0), (i * 10 + 3, 3)]);
        }
        for polygon in &polygons {
            insert_polygon(&mut rtree, polygon);
        }
        let grown_depth = rtree.depth();
        assert!(grown_depth >= 3);

        // 删到只剩一个对象，根坍缩应当把树高降回来
        for polygon in &polygons[..15] {
            remove_polygon(&mut rtree, polygon);
            rtree.check_invariants();
        }

        assert_eq!(rtree.count(), 1);
        assert!(rtree.depth() < grown_depth);
        let results = rtree.search(&Rectangle::new(0, 0, 1000, 1000));
        assert_eq!(results, vec![polygons[15].clone()]);
    }

    #[test]
    fn test_remove_everything_then_reuse() {
        let mut rtree = RTree::new(2);
        let mut polygons = Vec::new();
        for i in 0..10 {
            polygons.push(vec![(i * 7, 0), (i * 7 + 2, 2)]);
        }
        for polygon in &polygons {
            insert_polygon(&mut rtree, polygon);
        }

        for polygon in &polygons {
            remove_polygon(&mut rtree, polygon);
        }
        assert_eq!(rtree.count(), 0);
        assert!(rtree.objects().is_empty());

        // 清空后的树可以继续正常插入
        let fresh = vec![(0, 0), (5, 5)];
        insert_polygon(&mut rtree, &fresh);
        assert_eq!(rtree.count(), 1);
        rtree.check_invariants();
    }
}
