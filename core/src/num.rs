// Implements the owned and mixed-ownership forms of a binary operator, plus
// its compound assignment, in terms of the `&BigInt op &BigInt` impl.
macro_rules! forward_binop {
    (impl $imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident) => {
        impl $imp<BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                $imp::$method(&self, &rhs)
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                $imp::$method(&self, rhs)
            }
        }

        impl $imp<BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                $imp::$method(self, &rhs)
            }
        }

        impl $assign_imp<BigInt> for BigInt {
            fn $assign_method(&mut self, rhs: BigInt) {
                *self = $imp::$method(&*self, &rhs);
            }
        }

        impl $assign_imp<&BigInt> for BigInt {
            fn $assign_method(&mut self, rhs: &BigInt) {
                *self = $imp::$method(&*self, rhs);
            }
        }
    };
}

// Lets machine integers appear on the right-hand side, e.g. `x += 1`.
macro_rules! forward_scalar_binop {
    (impl $imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident; $($t:ty),*) => {
        $(
            impl $imp<$t> for BigInt {
                type Output = BigInt;

                fn $method(self, rhs: $t) -> BigInt {
                    $imp::$method(&self, &BigInt::from(rhs))
                }
            }

            impl $imp<$t> for &BigInt {
                type Output = BigInt;

                fn $method(self, rhs: $t) -> BigInt {
                    $imp::$method(self, &BigInt::from(rhs))
                }
            }

            impl $assign_imp<$t> for BigInt {
                fn $assign_method(&mut self, rhs: $t) {
                    *self = $imp::$method(&*self, &BigInt::from(rhs));
                }
            }
        )*
    };
}

mod bigint;
mod bitwise;
mod decimal;
mod magnitude;
mod sign;

pub use bigint::BigInt;
pub use sign::Sign;
