//! Dependency tree as a parent-pointer array over token positions.

use serde::{Deserialize, Serialize};

/// Sentinel used for the root in the signed (serialized) head array.
pub const ROOT: i64 = -1;

/// `heads[i]` is the position that token `i` attaches to, or `None` for
/// the root. The array is the only tree representation; child lists are
/// rebuilt from it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<i64>", try_from = "Vec<i64>")]
pub struct DependencyTree {
    heads: Vec<Option<usize>>,
}

impl DependencyTree {
    pub fn new(heads: Vec<Option<usize>>) -> Self {
        DependencyTree { heads }
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    pub fn head(&self, position: usize) -> Option<usize> {
        self.heads.get(position).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.heads
    }

    /// First position whose head is the root.
    pub fn root(&self) -> Option<usize> {
        self.heads.iter().position(Option::is_none)
    }

    /// Child positions of every node, each list in ascending position order.
    ///
    /// Head targets outside the array are ignored here; the evaluator
    /// reports them.
    pub fn children(&self) -> Vec<Vec<usize>> {
        let mut children = vec![Vec::new(); self.heads.len()];
        for (child, head) in self.heads.iter().enumerate() {
            if let Some(h) = *head {
                if let Some(list) = children.get_mut(h) {
                    list.push(child);
                }
            }
        }
        children
    }

    /// Head array in the signed convention: `-1` for the root.
    pub fn to_signed(&self) -> Vec<i64> {
        self.heads
            .iter()
            .map(|h| h.map_or(ROOT, |p| p as i64))
            .collect()
    }
}

impl From<DependencyTree> for Vec<i64> {
    fn from(tree: DependencyTree) -> Self {
        tree.to_signed()
    }
}

impl TryFrom<Vec<i64>> for DependencyTree {
    type Error = String;

    fn try_from(signed: Vec<i64>) -> Result<Self, Self::Error> {
        let heads = signed
            .into_iter()
            .enumerate()
            .map(|(i, h)| match h {
                ROOT => Ok(None),
                h if h >= 0 => Ok(Some(h as usize)),
                h => Err(format!("invalid head {} at position {}", h, i)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DependencyTree { heads })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_are_in_position_order() {
        // walk and jump: and(1) has children 0 and 2
        let tree = DependencyTree::new(vec![Some(1), None, Some(1)]);
        assert_eq!(tree.root(), Some(1));
        assert_eq!(tree.children(), vec![vec![], vec![0, 2], vec![]]);
    }

    #[test]
    fn signed_round_trip_through_json() {
        let tree = DependencyTree::new(vec![Some(1), None]);
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, "[1,-1]");
        let back: DependencyTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn rejects_negative_heads_other_than_root() {
        let err = serde_json::from_str::<DependencyTree>("[-2]").unwrap_err();
        assert!(err.to_string().contains("invalid head -2"));
    }
}
