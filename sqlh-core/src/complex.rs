use crate::{Result, SqlhError};

macro_rules! impl_complex {
    ($name:ident, $float:ty, $size:expr) => {
        /// Complex number stored as an opaque blob: the little endian real part followed by the
        /// little endian imaginary part.
        #[derive(Default, Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            pub re: $float,
            pub im: $float,
        }

        impl $name {
            pub const ENCODED_LEN: usize = $size * 2;

            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }

            pub fn to_bytes(&self) -> [u8; $size * 2] {
                let mut result = [0u8; $size * 2];
                result[..$size].copy_from_slice(&self.re.to_le_bytes());
                result[$size..].copy_from_slice(&self.im.to_le_bytes());
                result
            }

            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                let (Some(re), Some(im)) = (
                    bytes.get(..$size).and_then(|v| <[u8; $size]>::try_from(v).ok()),
                    bytes.get($size..).and_then(|v| <[u8; $size]>::try_from(v).ok()),
                ) else {
                    return Err(SqlhError::FieldTypeMismatch {
                        expected: stringify!($name),
                        found: format!("a blob of {} bytes", bytes.len()),
                    }
                    .into());
                };
                Ok(Self {
                    re: <$float>::from_le_bytes(re),
                    im: <$float>::from_le_bytes(im),
                })
            }
        }
    };
}

impl_complex!(Complex32, f32, 4);
impl_complex!(Complex64, f64, 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_real_then_imaginary() {
        let bytes = Complex32::new(1.0, -2.0).to_bytes();
        assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..], &(-2.0f32).to_le_bytes());
        assert_eq!(Complex64::ENCODED_LEN, 16);
    }

    #[test]
    fn decode() {
        let value = Complex64::new(0.5, 1e300);
        assert_eq!(Complex64::from_bytes(&value.to_bytes()).unwrap(), value);
    }

    #[test]
    fn decode_wrong_length() {
        let err = Complex32::from_bytes(&[0u8; 7]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SqlhError>(),
            Some(SqlhError::FieldTypeMismatch { expected: "Complex32", .. })
        ));
        assert!(Complex64::from_bytes(&[0u8; 17]).is_err());
    }
}
