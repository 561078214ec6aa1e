use serde::{Deserialize, Serialize};

/// External representation of an [`Item`](crate::entities::Item).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExtItem {
    /// Unique identifier of the item, ids have to be consecutive starting from 0
    pub id: u64,
    pub width: u64,
    pub height: u64,
}

/// External representation of an [`Instance`](crate::entities::Instance).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExtInstance {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub strip_width: u64,
    pub items: Vec<ExtItem>,
}

/// Lower-left corner of an item in a packing, together with the dimensions it occupies.
/// The dimensions can exceed those of the item when preprocessing enlarged it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExtPlacement {
    pub id: u64,
    pub x: u64,
    pub y: u64,
    pub width: u64,
    pub height: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtStatus {
    Feasible,
    Infeasible,
    Pending,
    TimeLimit,
}

/// External representation of the answer for a single strip height
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExtSolution {
    pub height: u64,
    pub status: ExtStatus,
    /// Empty unless the status is [`ExtStatus::Feasible`]
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub positions: Vec<ExtPlacement>,
    /// Best known lower bound on the strip height
    pub lower_bound: u64,
    /// Whether an infeasible status is a proof. False when a search ran out of nodes
    pub exact: bool,
    pub run_time_ms: u64,
}
