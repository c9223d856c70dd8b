//! Primitive stack operation vocabulary.
//!
//! The catalog is fixed and ordered: an operation's position is its stable
//! integer index, which is the only representation the search engine
//! understands. The pick family (`3pick`..`6pick`) carries a literal depth in
//! the name and expands to two caller-facing tokens.

use serde::{Deserialize, Serialize};

/// The generic pick word that literal-depth tokens pair with when a
/// pick-family operation is expanded.
pub const PICK_WORD: &str = "pick";

/// One primitive stack operation.
///
/// Declaration order is the catalog order, so the discriminant is the engine
/// wire index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    #[serde(rename = "dup")]
    Dup,
    #[serde(rename = "drop")]
    Drop,
    #[serde(rename = "swap")]
    Swap,
    #[serde(rename = "over")]
    Over,
    #[serde(rename = "rot")]
    Rot,
    #[serde(rename = ">r")]
    ToR,
    #[serde(rename = "r>")]
    RFrom,
    #[serde(rename = "2dup")]
    TwoDup,
    #[serde(rename = "2drop")]
    TwoDrop,
    #[serde(rename = "2swap")]
    TwoSwap,
    #[serde(rename = "2over")]
    TwoOver,
    #[serde(rename = "2rot")]
    TwoRot,
    #[serde(rename = "nip")]
    Nip,
    #[serde(rename = "tuck")]
    Tuck,
    #[serde(rename = "-rot")]
    MinusRot,
    #[serde(rename = "r@")]
    RFetch,
    #[serde(rename = "2>r")]
    TwoToR,
    #[serde(rename = "2r>")]
    TwoRFrom,
    #[serde(rename = "2r@")]
    TwoRFetch,
    #[serde(rename = "3pick")]
    Pick3,
    #[serde(rename = "4pick")]
    Pick4,
    #[serde(rename = "5pick")]
    Pick5,
    #[serde(rename = "6pick")]
    Pick6,
}

impl Op {
    /// Every operation, in catalog (index) order.
    pub const ALL: [Op; 23] = [
        Op::Dup,
        Op::Drop,
        Op::Swap,
        Op::Over,
        Op::Rot,
        Op::ToR,
        Op::RFrom,
        Op::TwoDup,
        Op::TwoDrop,
        Op::TwoSwap,
        Op::TwoOver,
        Op::TwoRot,
        Op::Nip,
        Op::Tuck,
        Op::MinusRot,
        Op::RFetch,
        Op::TwoToR,
        Op::TwoRFrom,
        Op::TwoRFetch,
        Op::Pick3,
        Op::Pick4,
        Op::Pick5,
        Op::Pick6,
    ];

    /// The pick-family subset, in catalog order.
    pub const PICK_FAMILY: [Op; 4] = [Op::Pick3, Op::Pick4, Op::Pick5, Op::Pick6];

    /// Forth name of the operation.
    pub fn name(self) -> &'static str {
        match self {
            Op::Dup => "dup",
            Op::Drop => "drop",
            Op::Swap => "swap",
            Op::Over => "over",
            Op::Rot => "rot",
            Op::ToR => ">r",
            Op::RFrom => "r>",
            Op::TwoDup => "2dup",
            Op::TwoDrop => "2drop",
            Op::TwoSwap => "2swap",
            Op::TwoOver => "2over",
            Op::TwoRot => "2rot",
            Op::Nip => "nip",
            Op::Tuck => "tuck",
            Op::MinusRot => "-rot",
            Op::RFetch => "r@",
            Op::TwoToR => "2>r",
            Op::TwoRFrom => "2r>",
            Op::TwoRFetch => "2r@",
            Op::Pick3 => "3pick",
            Op::Pick4 => "4pick",
            Op::Pick5 => "5pick",
            Op::Pick6 => "6pick",
        }
    }

    /// Look an operation up by its Forth name.
    pub fn from_name(name: &str) -> Option<Op> {
        Op::ALL.iter().copied().find(|op| op.name() == name)
    }

    /// Stable catalog index, the engine wire representation.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Op::index`].
    pub fn from_index(index: usize) -> Option<Op> {
        Op::ALL.get(index).copied()
    }

    pub fn is_pick(self) -> bool {
        self.pick_depth().is_some()
    }

    /// Literal depth for pick-family operations, `None` otherwise.
    pub fn pick_depth(self) -> Option<usize> {
        match self {
            Op::Pick3 => Some(3),
            Op::Pick4 => Some(4),
            Op::Pick5 => Some(5),
            Op::Pick6 => Some(6),
            _ => None,
        }
    }

    /// Caller-facing tokens for this operation: `npick` becomes the literal
    /// depth followed by the generic pick word, everything else is itself.
    pub fn expand(self) -> Vec<String> {
        match self.pick_depth() {
            Some(depth) => vec![depth.to_string(), PICK_WORD.to_string()],
            None => vec![self.name().to_string()],
        }
    }

    /// All non-pick operations, in catalog order.
    pub fn non_pick() -> impl Iterator<Item = Op> {
        Op::ALL.iter().copied().filter(|op| !op.is_pick())
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Expand a whole unexpanded sequence into caller-facing tokens.
pub fn expand_sequence(ops: &[Op]) -> Vec<String> {
    let mut words = Vec::with_capacity(ops.len());
    for op in ops {
        words.extend(op.expand());
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_is_index() {
        for (position, op) in Op::ALL.iter().enumerate() {
            assert_eq!(op.index(), position);
            assert_eq!(Op::from_index(position), Some(*op));
        }
        // Spot-check the wire indices the engine protocol depends on.
        assert_eq!(Op::Dup.index(), 0);
        assert_eq!(Op::Drop.index(), 1);
        assert_eq!(Op::RFetch.index(), 15);
        assert_eq!(Op::Pick3.index(), 19);
        assert_eq!(Op::Pick6.index(), 22);
        assert_eq!(Op::from_index(23), None);
    }

    #[test]
    fn test_name_lookup_inverse() {
        for op in Op::ALL {
            assert_eq!(Op::from_name(op.name()), Some(op));
        }
        assert_eq!(Op::from_name(">r"), Some(Op::ToR));
        assert_eq!(Op::from_name("-rot"), Some(Op::MinusRot));
        assert_eq!(Op::from_name("r@"), Some(Op::RFetch));
        assert_eq!(Op::from_name("pick"), None);
        assert_eq!(Op::from_name(""), None);
    }

    #[test]
    fn test_pick_expansion() {
        assert_eq!(Op::Pick4.expand(), vec!["4".to_string(), "pick".to_string()]);
        assert_eq!(Op::Swap.expand(), vec!["swap".to_string()]);
        assert_eq!(
            expand_sequence(&[Op::Swap, Op::Pick3]),
            vec!["swap", "3", "pick"]
        );
    }

    #[test]
    fn test_pick_family_partition() {
        assert_eq!(Op::non_pick().count(), 19);
        assert!(Op::non_pick().all(|op| !op.is_pick()));
        assert!(Op::PICK_FAMILY.iter().all(|op| op.is_pick()));
        assert_eq!(Op::Pick5.pick_depth(), Some(5));
        assert_eq!(Op::Tuck.pick_depth(), None);
    }

    #[test]
    fn test_serde_uses_forth_names() {
        let json = serde_json::to_string(&[Op::ToR, Op::Pick3]).unwrap();
        assert_eq!(json, r#"[">r","3pick"]"#);
        let back: Vec<Op> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Op::ToR, Op::Pick3]);
    }
}
