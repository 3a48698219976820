pub mod commands;
pub mod components;
pub mod crs_geo;
mod errors;
pub mod geojson;
mod indexes;
pub mod logging;

#[cfg(test)]
pub(crate) mod test_utils;

pub use components::{File, GdalFile, GeoBounds, Metadata};
pub use errors::{Result, RioError};
pub use indexes::Indexes;

use num::traits::AsPrimitive;

fn tuple_to<TO: Copy + 'static, TI: AsPrimitive<TO>>(tuple: (TI, TI)) -> (TO, TO) {
    (tuple.0.as_(), tuple.1.as_())
}
