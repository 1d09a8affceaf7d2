//! Markdown string utilities shared by the block and inline renderers.

mod escape;

pub use escape::{
    calculate_fence_length, calculate_inline_code_ticks, code_span, escape_table_cell,
};
