pub mod options;
pub mod params;
pub mod site;

pub use options::{create_options, TrackerOptions, UserOptions};
pub use params::{build_parameters, ParamValue, TrackingParameters};
pub use site::SiteId;
