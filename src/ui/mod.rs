pub mod frame;
pub mod frame_json;
pub mod highlight;
pub mod span;
pub mod style;
pub mod time;

pub use frame::Frame;
pub use span::{Span, SpanLine};
pub use style::{Color, Style};
