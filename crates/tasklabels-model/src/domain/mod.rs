mod labels;
pub use labels::LabelSet;

mod value;
pub use value::LabelValue;

mod environment;
pub use environment::EnvironmentDescriptor;

mod policy;
pub use policy::FramePolicy;

pub(crate) mod constants;
pub use constants::{
    DEFAULT_ENABLED_SINCE, DISABLE_FRAME_FLAG, EXPERIMENTAL_FRAME_FLAG, EXPERIMENTAL_SINCE,
};
