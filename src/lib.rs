mod decode;
mod error;
mod export;
mod record;
pub mod render;
mod session;
mod source;
mod time;
mod view;

pub use crate::{
    error::*,
    export::{HEADER_CORNER, MASKED_CELL},
    record::{COORDINATE_DECIMALS, Grid, Record, round_coordinate},
    render::{ColorBarOrientation, Rect, RenderOptions, RenderedMap},
    session::*,
    source::*,
    view::*,
};
