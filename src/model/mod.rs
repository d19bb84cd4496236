pub mod date_range;
pub mod filter;
pub mod gesture;
pub mod segment;
pub mod store;
pub mod task;

pub use date_range::DateRange;
pub use filter::{DurationWindow, FilterState, FilterUpdate};
pub use gesture::{DragKind, DragSelection, TaskDrag};
pub use segment::{week_segment, WeekSegment};
pub use store::TaskStore;
pub use task::{Category, Task};
