macro_rules! try_vec {
	($elem:expr; $size:expr) => {{ $crate::util::alloc::fallible_vec_from_element($elem, $size)? }};
}

// Shorthand for return Err(DemuxError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(DemuxError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(DemuxError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::DemuxError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::DemuxError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for DecodingError::new("Message")
//
// Usage:
//
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($reason:literal) => {
		Into::<crate::error::DemuxError>::into(crate::error::DecodingError::new($reason))
	};
	(@BAIL $reason:literal) => {
		return Err(decode_err!($reason))
	};
}

pub(crate) use {decode_err, err, try_vec};
