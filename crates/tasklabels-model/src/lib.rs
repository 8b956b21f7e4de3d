mod domain;
pub use domain::{
    DEFAULT_ENABLED_SINCE, DISABLE_FRAME_FLAG, EXPERIMENTAL_FRAME_FLAG, EXPERIMENTAL_SINCE,
};
pub use domain::{EnvironmentDescriptor, FramePolicy, LabelSet, LabelValue};

mod error;
pub use error::{ModelError, ModelResult};
