use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 单点输入在构建MBR时向四周扩展的边距
///
/// 退化的零面积矩形无法参与基于面积的分裂启发式比较，
/// 因此单点多边形的MBR在每个方向上扩展固定的边距
pub const POINT_MARGIN: i32 = 5;

/// 矩形边界框 - 用于表示R-tree中的最小边界矩形(MBR)
///
/// 使用整数坐标空间，不变量：每个轴上 min[axis] <= max[axis]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[display(fmt = "[{:?}, {:?}]", min, max)]
pub struct Rectangle {
    pub min: [i32; 2], // [x_min, y_min]
    pub max: [i32; 2], // [x_max, y_max]
}

impl Rectangle {
    /// 创建新的矩形
    pub fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        assert!(x_min <= x_max && y_min <= y_max, "Invalid rectangle bounds");
        Rectangle {
            min: [x_min, y_min],
            max: [x_max, y_max],
        }
    }

    /// 从两个对角点创建矩形
    pub fn from_corners(min: [i32; 2], max: [i32; 2]) -> Self {
        Self::new(min[0], min[1], max[0], max[1])
    }

    /// 计算多边形顶点序列的最小边界矩形
    ///
    /// 返回包含所有顶点的最紧轴对齐矩形；单点输入在每个方向上
    /// 扩展 POINT_MARGIN
    pub fn from_points(points: &[(i32, i32)]) -> Self {
        assert!(!points.is_empty(), "Empty point sequence has no bounding rectangle");

        let (mut x1, mut y1) = points[0];
        let (mut x2, mut y2) = points[0];

        if points.len() == 1 {
            x1 -= POINT_MARGIN;
            x2 += POINT_MARGIN;
            y1 -= POINT_MARGIN;
            y2 += POINT_MARGIN;
        } else {
            for &(x, y) in &points[1..] {
                x1 = x1.min(x);
                x2 = x2.max(x);
                y1 = y1.min(y);
                y2 = y2.max(y);
            }
        }

        Rectangle::new(x1, y1, x2, y2)
    }

    /// 计算矩形面积
    ///
    /// 整数坐标的乘积可能超出 i32 范围，面积统一用 i64 表示
    pub fn area(&self) -> i64 {
        (self.max[0] - self.min[0]) as i64 * (self.max[1] - self.min[1]) as i64
    }

    /// 计算两个矩形的并集MBR
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            min: [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            max: [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        }
    }

    /// 判断两个矩形是否相交
    ///
    /// 标准的区间相交判定，边界接触也算相交
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.min[0] <= other.max[0]
            && other.min[0] <= self.max[0]
            && self.min[1] <= other.max[1]
            && other.min[1] <= self.max[1]
    }

    /// 判断当前矩形是否完全包含另一个矩形
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.min[0] <= other.min[0]
            && self.min[1] <= other.min[1]
            && self.max[0] >= other.max[0]
            && self.max[1] >= other.max[1]
    }

    /// 计算扩大到包含另一个矩形所需的面积增量
    pub fn enlargement(&self, other: &Rectangle) -> i64 {
        self.union(other).area() - self.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(0, 0, 10, 10);
        assert_eq!(rect.min, [0, 0]);
        assert_eq!(rect.max, [10, 10]);
    }

    #[test]
    #[should_panic(expected = "Invalid rectangle bounds")]
    fn test_rectangle_invalid_bounds() {
        let _ = Rectangle::new(10, 0, 0, 10);
    }

    #[test]
    fn test_rectangle_area() {
        let rect = Rectangle::new(0, 0, 10, 5);
        assert_eq!(rect.area(), 50);

        // 退化为线段或点的矩形面积为0
        assert_eq!(Rectangle::new(3, 3, 3, 8).area(), 0);
    }

    #[test]
    fn test_rectangle_union() {
        let rect1 = Rectangle::new(0, 0, 5, 5);
        let rect2 = Rectangle::new(3, 3, 8, 8);
        assert_eq!(rect1.union(&rect2), Rectangle::new(0, 0, 8, 8));
    }

    #[test]
    fn test_rectangle_intersects() {
        let rect1 = Rectangle::new(0, 0, 5, 5);
        let rect2 = Rectangle::new(3, 3, 8, 8);
        let rect3 = Rectangle::new(10, 10, 15, 15);

        assert!(rect1.intersects(&rect2));
        assert!(!rect1.intersects(&rect3));

        // 边界接触也算相交
        let touching = Rectangle::new(5, 0, 9, 5);
        assert!(rect1.intersects(&touching));
    }

    #[test]
    fn test_rectangle_contains() {
        let outer = Rectangle::new(0, 0, 10, 10);
        let inner = Rectangle::new(2, 2, 8, 8);
        let crossing = Rectangle::new(5, 5, 15, 15);

        assert!(outer.contains(&inner));
        assert!(!outer.contains(&crossing));
    }

    #[test]
    fn test_rectangle_enlargement() {
        let rect1 = Rectangle::new(0, 0, 5, 5);
        let rect2 = Rectangle::new(3, 3, 8, 8);
        assert_eq!(rect1.enlargement(&rect2), 39); // 8*8 - 5*5 = 64 - 25 = 39

        // 已被包含的矩形不需要扩大
        let inner = Rectangle::new(1, 1, 2, 2);
        assert_eq!(rect1.enlargement(&inner), 0);
    }

    #[test]
    fn test_from_points_polygon() {
        let polygon = vec![(0, 0), (4, 0), (2, 3), (-1, 1)];
        assert_eq!(Rectangle::from_points(&polygon), Rectangle::new(-1, 0, 4, 3));
    }

    #[test]
    fn test_from_points_single_point_margin() {
        // 单点输入向四周各扩展5个单位
        let rect = Rectangle::from_points(&[(5, 5)]);
        assert_eq!(rect, Rectangle::new(0, 0, 10, 10));
    }

    #[test]
    fn test_from_points_two_points() {
        // 两个点不再扩展边距，取其紧致包围盒
        let rect = Rectangle::from_points(&[(5, 5), (5, 9)]);
        assert_eq!(rect, Rectangle::new(5, 5, 5, 9));
    }
}
