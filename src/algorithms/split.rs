use super::insert::InsertOutcome;
use crate::node::{Entry, Node};
use crate::rectangle::Rectangle;
use crate::rtree::RTree;

/// 二次分裂过程中的分组状态
///
/// 跟踪每个缓冲条目的分组归属以及两组当前的覆盖矩形、
/// 面积和条目数，分配时增量维护，避免每轮重新扫描已
/// 分配的条目
struct PartitionVars {
    /// 每个缓冲条目的分组归属，None表示尚未分配
    partition: Vec<Option<usize>>,
    /// 两组的当前条目数
    count: [usize; 2],
    /// 两组的当前覆盖矩形（组为空时无意义）
    cover: [Rectangle; 2],
    /// 两组覆盖矩形的面积
    area: [i64; 2],
}

impl PartitionVars {
    fn new(total: usize) -> Self {
        PartitionVars {
            partition: vec![None; total],
            count: [0, 0],
            cover: [Rectangle::new(0, 0, 0, 0); 2],
            area: [0, 0],
        }
    }

    /// 把指定条目分配到指定分组并更新该组的覆盖信息
    fn classify(&mut self, index: usize, group: usize, rects: &[Rectangle]) {
        debug_assert!(self.partition[index].is_none(), "entry classified twice");

        self.partition[index] = Some(group);
        self.cover[group] = if self.count[group] == 0 {
            rects[index]
        } else {
            self.cover[group].union(&rects[index])
        };
        self.area[group] = self.cover[group].area();
        self.count[group] += 1;
    }

    fn assigned(&self) -> usize {
        self.count[0] + self.count[1]
    }
}

/// 节点分裂算法 - 实现完整的二次分裂(Quadratic Split)
impl RTree {
    /// 尝试把条目加入节点，容量耗尽时分裂
    ///
    /// 返回NoSplit表示直接放入；返回Split时原节点持有第0组，
    /// 新兄弟节点持有第1组
    pub(crate) fn add_entry(
        node: &mut Node,
        entry: Entry,
        max_entries: usize,
        min_entries: usize,
    ) -> InsertOutcome {
        if node.entries.len() < max_entries {
            node.entries.push(entry);
            InsertOutcome::NoSplit
        } else {
            InsertOutcome::Split(Self::split_node(node, entry, min_entries))
        }
    }

    /// 分裂溢出的节点 - 遵循论文Algorithm SplitNode
    ///
    /// 原有M个条目加上溢出条目共M+1个进入缓冲，二次分裂分成
    /// 两组后按分区顺序放回原节点和同层级的新兄弟节点
    fn split_node(node: &mut Node, entry: Entry, min_entries: usize) -> Box<Node> {
        let mut buffer = std::mem::take(&mut node.entries);
        buffer.push(entry);

        let rects: Vec<Rectangle> = buffer.iter().map(|buffered| *buffered.mbr()).collect();
        let partition = Self::quadratic_split(&rects, min_entries);

        let mut sibling = Box::new(Node::new(node.level));
        for (buffered, group) in buffer.into_iter().zip(partition) {
            if group == 0 {
                node.entries.push(buffered);
            } else {
                sibling.entries.push(buffered);
            }
        }

        debug_assert!(
            node.entries.len() >= min_entries && sibling.entries.len() >= min_entries,
            "split produced an under-filled group"
        );
        sibling
    }

    /// 二次分裂分组 - 遵循论文Algorithm QuadraticSplit
    ///
    /// 输入M+1个条目的矩形，返回每个条目的分组归属（0或1），
    /// 两组都不会少于min_fill个条目
    fn quadratic_split(rects: &[Rectangle], min_fill: usize) -> Vec<usize> {
        let total = rects.len();
        let mut vars = PartitionVars::new(total);

        // QS1: 选择浪费空间最大的一对条目作为两组的种子
        Self::pick_seeds(rects, &mut vars);

        // QS2: 逐个分配剩余条目，直到全部分配完毕，或者某一组
        // 再多拿一个就会把另一组压到最小填充以下
        while vars.assigned() < total
            && vars.count[0] < total - min_fill
            && vars.count[1] < total - min_fill
        {
            let (chosen, group) = Self::pick_next(rects, &vars);
            vars.classify(chosen, group, rects);
        }

        // QS3: 强制填充 - 剩余条目全部分给还没到配额的那一组，
        // 任何一组都不会低于最小填充
        if vars.assigned() < total {
            let group = if vars.count[0] >= total - min_fill { 1 } else { 0 };
            for index in 0..total {
                if vars.partition[index].is_none() {
                    vars.classify(index, group, rects);
                }
            }
        }

        vars.partition
            .into_iter()
            .map(|group| group.expect("every entry classified"))
            .collect()
    }

    /// PickSeeds算法 - 选择组合后死空间最大的两个条目作为种子
    ///
    /// 死空间 = 包含两个条目的矩形面积 - 两个条目各自的面积，
    /// 相距最远的一对条目不应进入同一组
    fn pick_seeds(rects: &[Rectangle], vars: &mut PartitionVars) {
        // 全体条目的覆盖面积只用来初始化下界，保证任何一对都能当选
        let cover_all = rects[1..]
            .iter()
            .fold(rects[0], |cover, rect| cover.union(rect));
        let mut worst = -cover_all.area() - 1;

        let mut seed0 = 0;
        let mut seed1 = 1;

        for index_a in 0..rects.len() - 1 {
            for index_b in (index_a + 1)..rects.len() {
                let combined = rects[index_a].union(&rects[index_b]);
                let waste = combined.area() - rects[index_a].area() - rects[index_b].area();
                if waste > worst {
                    worst = waste;
                    seed0 = index_a;
                    seed1 = index_b;
                }
            }
        }

        vars.classify(seed0, 0, rects);
        vars.classify(seed1, 1, rects);
    }

    /// PickNext算法 - 选择下一个要分配的条目及其目标分组
    ///
    /// 对每个未分配条目计算加入两组的面积增长，增长差最大的
    /// 条目偏好最明显，优先分配；它去往增长较小的那组，增长
    /// 差并列时优先条目数较少的组
    fn pick_next(rects: &[Rectangle], vars: &PartitionVars) -> (usize, usize) {
        let mut biggest_diff = -1_i64;
        let mut chosen = 0;
        let mut better_group = 0;

        for (index, rect) in rects.iter().enumerate() {
            if vars.partition[index].is_some() {
                continue;
            }

            let growth0 = vars.cover[0].union(rect).area() - vars.area[0];
            let growth1 = vars.cover[1].union(rect).area() - vars.area[1];
            let (group, diff) = if growth1 >= growth0 {
                (0, growth1 - growth0)
            } else {
                (1, growth0 - growth1)
            };

            if diff > biggest_diff {
                biggest_diff = diff;
                chosen = index;
                better_group = group;
            } else if diff == biggest_diff && vars.count[group] < vars.count[better_group] {
                chosen = index;
                better_group = group;
            }
        }

        (chosen, better_group)
    }
}
