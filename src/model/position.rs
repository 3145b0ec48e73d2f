use serde::{Deserialize, Serialize};

/// A user-dragged override of a component's position in one view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
    pub component_id: String,
    pub view_type: String,
    pub user_id: String,
    pub x_position: f64,
    pub y_position: f64,
}

impl NodePosition {
    pub fn key(&self) -> PositionKey {
        PositionKey {
            component_id: self.component_id.clone(),
            view_type: self.view_type.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

/// Upsert key of the position store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey {
    pub component_id: String,
    pub view_type: String,
    pub user_id: String,
}
