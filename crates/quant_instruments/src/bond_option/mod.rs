//! Options on zero-coupon bonds.
//!
//! [`CirBondOption`] prices a European call or put on a zero-coupon bond
//! with the closed form of Cox, Ingersoll and Ross (1985), which reduces to
//! two noncentral chi-squared distribution functions.

mod cir;

pub use cir::CirBondOption;
