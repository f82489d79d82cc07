use crate::rectangle::Rectangle;
use serde::{Deserialize, Serialize};

/// 多边形载荷 - 有序的整数坐标点序列
///
/// 既是对象的几何数据，也是删除操作的身份键：
/// 按整个序列的值相等比较，两个MBR相同但顶点不同的对象
/// 可以被正确区分
pub type Polygon = Vec<(i32, i32)>;

/// R-tree节点条目
///
/// 每个条目都包含一个MBR（最小边界矩形）和对应的内容：
/// - Data条目：存储用户插入的多边形，只出现在叶子节点中
/// - Node条目：持有子节点的所有权，只出现在索引节点中
///
/// 同一个节点中两种条目不会混用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entry {
    /// 数据条目：多边形及其边界矩形
    Data { mbr: Rectangle, data: Polygon },

    /// 节点条目：子节点及其覆盖矩形
    ///
    /// mbr必须是子节点所有条目MBR的精确并集，
    /// 子树发生结构变化后由上层负责重建
    Node { mbr: Rectangle, node: Box<Node> },
}

impl Entry {
    /// 获取条目的MBR
    pub fn mbr(&self) -> &Rectangle {
        match self {
            Entry::Data { mbr, .. } => mbr,
            Entry::Node { mbr, .. } => mbr,
        }
    }

    /// 获取条目的MBR（可变引用）
    ///
    /// 用于分裂或删除后刷新覆盖矩形
    pub fn mbr_mut(&mut self) -> &mut Rectangle {
        match self {
            Entry::Data { mbr, .. } => mbr,
            Entry::Node { mbr, .. } => mbr,
        }
    }

    /// 检查是否为数据条目
    pub fn is_data(&self) -> bool {
        matches!(self, Entry::Data { .. })
    }

    /// 获取数据条目的多边形（如果是数据条目）
    pub fn data(&self) -> Option<&Polygon> {
        match self {
            Entry::Data { data, .. } => Some(data),
            Entry::Node { .. } => None,
        }
    }

    /// 获取节点条目的子节点引用（如果是节点条目）
    pub fn child(&self) -> Option<&Node> {
        match self {
            Entry::Data { .. } => None,
            Entry::Node { node, .. } => Some(node),
        }
    }
}

/// R-tree节点
///
/// level为0的节点是叶子节点，条目全部为数据条目；
/// level大于0的节点是索引节点，条目全部为子节点条目，
/// 且子节点的层级恰好比父节点小1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// 节点包含的条目列表
    ///
    /// 稳定状态下最多max_entries个，仅在分裂计算期间短暂
    /// 容纳max_entries + 1个
    pub entries: Vec<Entry>,

    /// 节点在树中的层级
    ///
    /// 叶子层为0，向上逐层加1，根节点层级最高
    pub level: usize,
}

impl Node {
    /// 创建指定层级的空节点
    pub fn new(level: usize) -> Self {
        Node {
            entries: Vec::new(),
            level,
        }
    }

    /// 创建新的叶子节点
    pub fn new_leaf_node() -> Self {
        Self::new(0)
    }

    /// 创建新的索引节点
    ///
    /// # 参数
    /// * `level` - 节点在树中的层级，必须 > 0
    pub fn new_index_node(level: usize) -> Self {
        debug_assert!(level > 0, "index node at leaf level");
        Self::new(level)
    }

    /// 检查是否为叶子节点
    pub fn is_leaf_node(&self) -> bool {
        self.level == 0
    }

    /// 检查是否为索引节点
    pub fn is_index_node(&self) -> bool {
        self.level > 0
    }

    /// 计算覆盖节点所有条目的最小边界矩形
    ///
    /// 父条目的MBR在子树结构变化后用它重建；
    /// 调用方需保证节点非空
    pub fn cover(&self) -> Rectangle {
        debug_assert!(!self.entries.is_empty(), "cover of empty node");

        let Some(first) = self.entries.first() else {
            return Rectangle::new(0, 0, 0, 0);
        };

        let mut mbr = *first.mbr();
        for entry in &self.entries[1..] {
            mbr = mbr.union(entry.mbr());
        }
        mbr
    }
}
