//! Built-in column types

mod checkbox;
mod constant;
mod date;
mod icon;
mod list;
mod string;
mod text;

pub use checkbox::CheckBoxColumn;
pub use constant::ConstantTextColumn;
pub use date::DateColumn;
pub use icon::{FontAwesome4Column, FontAwesome5Column, GlyphiconColumn};
pub use list::BulletedListColumn;
pub use string::StringColumn;
pub use text::TextColumn;
