use super::definition::FunctionFragment;
use crate::error::ConversionError;

/// A trait for provider-specific fragment formats that can be converted into a
/// Kumitate `FunctionFragment` tree.
pub trait IntoFragment {
    /// Consumes the object and converts it into the root of a fragment tree.
    fn into_fragment(self) -> Result<FunctionFragment, ConversionError>;
}

impl IntoFragment for FunctionFragment {
    fn into_fragment(self) -> Result<FunctionFragment, ConversionError> {
        Ok(self)
    }
}
