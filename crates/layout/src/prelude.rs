pub use orthodraw_store::prelude::*;

pub use crate::coloring::three_color;
pub use crate::cross::cross_check;
pub use crate::cross::remove_crossings;
pub use crate::cross::segment_cross;
pub use crate::cross::CrossingKind;
pub use crate::draw::draw;
pub use crate::draw::draw_with;
pub use crate::draw::place_vertices;
pub use crate::draw::MAX_DEGREE;
pub use crate::order::balanced_order;
pub use crate::order::refine_order;
pub use crate::order::vertex_type;
pub use crate::order::OrderingConfig;
pub use crate::order::Requeue;
pub use crate::ports::assign_ports;
pub use crate::roles::label_roles;
pub use crate::route::route_edges;

pub use crate::Error;
