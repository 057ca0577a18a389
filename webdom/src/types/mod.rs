mod edges;
mod rect;

pub use edges::Edges;
pub use rect::Rect;
