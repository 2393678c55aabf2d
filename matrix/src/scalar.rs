use num_traits::{One, Zero};

/// Element kinds that support matrix arithmetic.
///
/// Integer kinds wrap on overflow; guarding against it is up to the caller.
pub trait Scalar: Copy + PartialEq + Default + Zero + One + Send + Sync + 'static {
    fn plus(self, rhs: Self) -> Self;

    fn minus(self, rhs: Self) -> Self;

    fn times(self, rhs: Self) -> Self;
}

macro_rules! impl_scalar {
    (@ $t:ty; $($method:ident => $op:ident),*; wrapping) => {
        paste::paste! {
            impl Scalar for $t {
                $(
                    #[inline(always)]
                    fn $method(self, rhs: Self) -> Self {
                        self.[<wrapping_ $op>](rhs)
                    }
                )*
            }
        }
    };
    (@ $t:ty; $($method:ident => $op:ident),*; ieee) => {
        paste::paste! {
            impl Scalar for $t {
                $(
                    #[inline(always)]
                    fn $method(self, rhs: Self) -> Self {
                        core::ops::[<$op:camel>]::$op(self, rhs)
                    }
                )*
            }
        }
    };
    (wrapping: $($int:ty),* ; ieee: $($float:ty),* $(;)?) => {
        $(impl_scalar!(@ $int; plus => add, minus => sub, times => mul; wrapping);)*
        $(impl_scalar!(@ $float; plus => add, minus => sub, times => mul; ieee);)*
    };
}

impl_scalar!(
    wrapping: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize;
    ieee: f32, f64;
);

#[cfg(test)]
mod test {
    use crate::scalar::Scalar;

    #[test]
    fn wraps_on_overflow() {
        assert_eq!(i32::MAX.plus(1), i32::MIN);
        assert_eq!(0u8.minus(1), u8::MAX);
        assert_eq!(i64::MAX.times(2), -2);
        assert_eq!(7i16.plus(5).times(2).minus(4), 20);
    }

    #[test]
    fn float() {
        assert_eq!(1.5f64.plus(2.0).times(2.0).minus(1.0), 6.0);
        assert!(f32::MAX.times(2.0).is_infinite());
    }
}
