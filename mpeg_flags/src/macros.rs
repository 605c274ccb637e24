// Shorthand for return Err(MpegFlagsError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)                   -> return Err(MpegFlagsError::new(ErrorKind::Variant))
// - err!(Variant { field: value })  -> return Err(MpegFlagsError::new(ErrorKind::Variant { field: value }))
// - err!(Variant { field })         -> same, with a variable named after the field
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::MpegFlagsError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident { $($field:ident $(: $value:expr)?),+ $(,)? }) => {
		return Err(crate::error::MpegFlagsError::new(
			crate::error::ErrorKind::$variant { $($field $(: $value)?),+ },
		))
	};
}

// Shorthand for the frame errors, which all carry the frame offset and number
//
// Usage:
// - frame_err!(@BAIL Variant, offset, frame_number)
macro_rules! frame_err {
	(@BAIL $variant:ident, $offset:expr, $frame:expr) => {
		crate::macros::err!($variant {
			offset: $offset,
			frame: $frame,
		})
	};
}

pub(crate) use {err, frame_err};
