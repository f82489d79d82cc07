use crate::node::{Entry, Node, Polygon};
use crate::rectangle::Rectangle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 导出错误类型
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 用于JSON序列化的简化树结构
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeVisualization {
    /// 树的配置参数
    pub config: TreeConfig,
    /// 根节点
    pub root: NodeVisualization,
}

/// 用于JSON序列化的树配置
#[derive(Debug, Serialize, Deserialize)]
pub struct TreeConfig {
    pub max_entries: usize,
    pub min_entries: usize,
}

/// 用于JSON序列化的节点结构
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeVisualization {
    /// 节点所有条目的覆盖矩形
    pub mbr: Rectangle,
    /// 节点层级
    pub level: usize,
    /// 数据条目（仅叶子节点）
    pub data_entries: Vec<DataEntry>,
    /// 子节点（仅索引节点）
    pub child_nodes: Vec<NodeVisualization>,
}

/// 用于JSON序列化的数据条目
#[derive(Debug, Serialize, Deserialize)]
pub struct DataEntry {
    pub mbr: Rectangle,
    pub data: Polygon,
}

/// R-tree主结构
///
/// 单线程独占使用：所有写操作需要&mut self，读操作共享&self，
/// 跨线程共享时由调用方自行串行化。Clone执行完整的深拷贝，
/// 副本与原树不共享任何节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RTree {
    /// 根节点 - 始终存在，空树时为没有条目的叶子节点
    pub(crate) root: Box<Node>,
    /// 最大条目数M
    pub(crate) max_entries: usize,
    /// 最小条目数m
    pub(crate) min_entries: usize,
    /// 所有已插入多边形的平铺镜像
    ///
    /// 与叶子层内容保持同步，提供不走树遍历的对象快照
    pub(crate) objs: Vec<Polygon>,
}

impl RTree {
    /// 创建新的R-tree（m = M/2）
    pub fn new(max_entries: usize) -> Self {
        assert!(max_entries >= 2, "Max entries must be at least 2");
        Self::with_min_entries(max_entries, max_entries / 2)
    }

    /// 创建指定最小条目数的R-tree
    ///
    /// # 参数
    /// * `max_entries` - 每个节点的最大条目数M
    /// * `min_entries` - 非根节点的最小条目数m，要求 1 <= m <= M/2
    pub fn with_min_entries(max_entries: usize, min_entries: usize) -> Self {
        assert!(max_entries >= 2, "Max entries must be at least 2");
        assert!(
            min_entries >= 1 && min_entries <= max_entries / 2,
            "Min entries must be in 1..=max_entries/2"
        );

        RTree {
            root: Box::new(Node::new_leaf_node()),
            max_entries,
            min_entries,
            objs: Vec::new(),
        }
    }

    /// 检查R-tree是否为空
    ///
    /// 根节点只会在整棵树为空时没有条目
    pub fn is_empty(&self) -> bool {
        self.root.entries.is_empty()
    }

    /// 获取最大条目数
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// 获取最小条目数
    pub fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// 获取树的深度
    ///
    /// 空树也有一个空的根叶子，深度为1
    pub fn depth(&self) -> usize {
        self.root.level + 1
    }

    /// 统计树中数据条目的总数
    ///
    /// 每次调用都完整遍历一次，不做缓存
    pub fn count(&self) -> usize {
        Self::count_recursive(&self.root)
    }

    /// 递归统计节点下的数据条目数量
    fn count_recursive(node: &Node) -> usize {
        if node.is_index_node() {
            node.entries
                .iter()
                .map(|entry| match entry {
                    Entry::Node { node: child, .. } => Self::count_recursive(child),
                    Entry::Data { .. } => 1,
                })
                .sum()
        } else {
            node.entries.len()
        }
    }

    /// 获取所有已插入多边形的快照
    pub fn objects(&self) -> Vec<Polygon> {
        self.objs.clone()
    }

    /// 丢弃所有节点和对象，重置为空的单节点树
    pub fn remove_all(&mut self) {
        self.objs.clear();
        self.root = Box::new(Node::new_leaf_node());
    }

    /// 导出树结构为JSON格式
    ///
    /// 返回包含完整树结构的JSON字符串，用于外部检查和可视化
    pub fn export_to_json(&self) -> Result<String, ExportError> {
        let visualization = self.tree_visualization();
        Ok(serde_json::to_string_pretty(&visualization)?)
    }

    /// 导出树结构JSON到文件
    ///
    /// 先写入临时文件再重命名，中断不会留下不完整的文件
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let path = path.as_ref();
        let json = self.export_to_json()?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// 创建用于可视化的树结构
    fn tree_visualization(&self) -> TreeVisualization {
        TreeVisualization {
            config: TreeConfig {
                max_entries: self.max_entries,
                min_entries: self.min_entries,
            },
            root: Self::node_visualization(&self.root),
        }
    }

    /// 递归创建节点的可视化结构
    fn node_visualization(node: &Node) -> NodeVisualization {
        let mbr = if node.entries.is_empty() {
            Rectangle::new(0, 0, 0, 0)
        } else {
            node.cover()
        };
        let mut data_entries = Vec::new();
        let mut child_nodes = Vec::new();

        for entry in &node.entries {
            match entry {
                Entry::Data { mbr, data } => {
                    data_entries.push(DataEntry {
                        mbr: *mbr,
                        data: data.clone(),
                    });
                }
                Entry::Node { node: child, .. } => {
                    child_nodes.push(Self::node_visualization(child));
                }
            }
        }

        NodeVisualization {
            mbr,
            level: node.level,
            data_entries,
            child_nodes,
        }
    }
}
