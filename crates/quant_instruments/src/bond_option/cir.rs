//! European option on a zero-coupon bond under CIR.
//!
//! For option expiry T, bond maturity S and strike X (Brigo–Mercurio,
//! eq. 3.78):
//!
//! ```text
//! ZBC = P(0,S)·χ²(2r̄(ρ+ψ+B); 4aμ/σ², 2ρ²r e^(hT)/(ρ+ψ+B))
//!     − X·P(0,T)·χ²(2r̄(ρ+ψ);   4aμ/σ², 2ρ²r e^(hT)/(ρ+ψ))
//! ```
//!
//! with ρ = 2h/(σ²(e^(hT) − 1)), ψ = (a + h)/σ², B = B(S − T) and
//! r̄ = ln(A(S − T)/X)/B(S − T), the short rate at which the bond is
//! worth exactly the strike at expiry. χ² is the noncentral chi-squared
//! distribution function. The put follows from parity
//! ZBP = ZBC − P(0,S) + X·P(0,T).

use quant_math::math::differentiation::{first_backward, first_central, second_central};
use quant_math::math::probability::NoncentralChiSquared;
use quant_math::math::special::DEFAULT_SERIES_TERMS;
use quant_math::traits::Real;

use crate::bonds::{BondPricer, Cir};
use crate::error::PricingError;
use crate::european::OptionKind;
use crate::greeks::{with_pricing_errors, GreeksConfig};

const EXPIRY_EPSILON: f64 = 1e-10;

/// CIR option on a zero-coupon bond.
///
/// The noncentral chi-squared series needs 4aμ/σ² ≥ 2; parameters that
/// violate it surface as a [`PricingError::Math`] domain error.
///
/// The noncentrality grows like 1/T as the expiry shortens. The series
/// needs well over λ/2 terms (see [`CirBondOption::with_series_terms`]),
/// and the leading Poisson weight e^(−λ/2) underflows for λ above about
/// 1400, so very short expiries are not priced reliably.
///
/// # Examples
/// ```
/// use quant_instruments::bond_option::CirBondOption;
/// use quant_instruments::bonds::Cir;
/// use quant_instruments::european::OptionKind;
///
/// let model = Cir::new(0.5_f64, 0.05, 0.1).unwrap();
/// let call = CirBondOption::new(model, 0.8, 1.0, 5.0, OptionKind::Call).unwrap();
/// assert!((call.price(0.05).unwrap() - 0.022_659_55).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CirBondOption<T> {
    model: Cir<T>,
    strike: T,
    expiry: T,
    maturity: T,
    kind: OptionKind,
    series_terms: usize,
}

impl<T: Real> CirBondOption<T> {
    /// Creates an option expiring in `expiry` years on a bond maturing in
    /// `maturity` years.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] unless the strike is positive,
    /// `expiry ≥ 0` and `maturity > expiry`.
    pub fn new(
        model: Cir<T>,
        strike: T,
        expiry: T,
        maturity: T,
        kind: OptionKind,
    ) -> Result<Self, PricingError> {
        let option = Self {
            model,
            strike,
            expiry,
            maturity,
            kind,
            series_terms: DEFAULT_SERIES_TERMS,
        };
        option.validate()?;
        Ok(option)
    }

    /// Sets the truncation of the chi-squared series.
    ///
    /// # Errors
    /// [`PricingError::InvalidConfig`] if `terms` is zero.
    pub fn with_series_terms(mut self, terms: usize) -> Result<Self, PricingError> {
        if terms == 0 {
            return Err(PricingError::invalid_config(
                "chi-squared series needs at least one term",
            ));
        }
        self.series_terms = terms;
        Ok(self)
    }

    fn validate(&self) -> Result<(), PricingError> {
        if !(self.strike > T::zero()) || !self.strike.is_finite() {
            return Err(PricingError::invalid_parameter(
                "strike",
                self.strike.as_f64(),
                "must be positive and finite",
            ));
        }
        if !(self.expiry >= T::zero()) || !self.expiry.is_finite() {
            return Err(PricingError::invalid_parameter(
                "expiry",
                self.expiry.as_f64(),
                "must be non-negative and finite",
            ));
        }
        if !(self.maturity > self.expiry) || !self.maturity.is_finite() {
            return Err(PricingError::invalid_parameter(
                "maturity",
                self.maturity.as_f64(),
                "must be finite and after the option expiry",
            ));
        }
        Ok(())
    }

    /// Returns the short-rate model.
    pub fn model(&self) -> &Cir<T> {
        &self.model
    }

    /// Returns the strike.
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the option expiry in years.
    pub fn expiry(&self) -> T {
        self.expiry
    }

    /// Returns the bond maturity in years.
    pub fn maturity(&self) -> T {
        self.maturity
    }

    /// Returns call or put.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Prices the option at short rate `rate`.
    ///
    /// # Errors
    /// - [`PricingError::InvalidParameter`] for a negative rate
    /// - [`PricingError::Math`] if 4aμ/σ² < 2
    pub fn price(&self, rate: T) -> Result<T, PricingError> {
        self.validate()?;
        if !(rate >= T::zero()) || !rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                rate.as_f64(),
                "must be non-negative and finite",
            ));
        }

        let bond_to_maturity = self.model.price(rate, self.maturity)?;
        let tenor = self.maturity - self.expiry;
        if self.expiry <= T::lit(EXPIRY_EPSILON) {
            return Ok(self.kind.payoff(self.model.price(rate, tenor)?, self.strike));
        }
        let bond_to_expiry = self.model.price(rate, self.expiry)?;

        let m = &self.model;
        let sigma_sq = m.vol * m.vol;
        let h = m.h();
        let growth = (h * self.expiry).exp();
        let rho = T::lit(2.0) * h / (sigma_sq * (h * self.expiry).exp_m1());
        let psi = (m.mean_reversion + h) / sigma_sq;
        let b = m.b_factor(tenor);
        let critical_rate = (m.a_factor(tenor) / self.strike).ln() / b;
        let dof = m.dof();
        let scaled_rate = T::lit(2.0) * rho * rho * rate * growth;

        let bond_leg = NoncentralChiSquared::new(dof, scaled_rate / (rho + psi + b))?
            .cdf_with_terms(T::lit(2.0) * critical_rate * (rho + psi + b), self.series_terms)?;
        let strike_leg = NoncentralChiSquared::new(dof, scaled_rate / (rho + psi))?
            .cdf_with_terms(T::lit(2.0) * critical_rate * (rho + psi), self.series_terms)?;

        let call = bond_to_maturity * bond_leg - self.strike * bond_to_expiry * strike_leg;
        tracing::trace!(
            critical_rate = critical_rate.as_f64(),
            dof = dof.as_f64(),
            call = call.as_f64(),
            "CIR bond option priced"
        );
        Ok(self
            .kind
            .from_call(call, bond_to_maturity, self.strike * bond_to_expiry))
    }

    /// ∂V/∂r.
    ///
    /// # Errors
    /// Propagates pricing errors and invalid `config`.
    pub fn delta(&self, rate: T, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        with_pricing_errors(|r| self.price(r), |f| first_central(f, rate, config.rate_bump))
    }

    /// ∂²V/∂r².
    ///
    /// # Errors
    /// As for [`CirBondOption::delta`].
    pub fn gamma(&self, rate: T, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        with_pricing_errors(|r| self.price(r), |f| second_central(f, rate, config.rate_bump))
    }

    /// ∂V/∂σ of the short-rate volatility.
    ///
    /// # Errors
    /// As for [`CirBondOption::delta`].
    pub fn vega(&self, rate: T, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        with_pricing_errors(
            |vol| {
                let bumped = Self {
                    model: self.model.with_vol(vol)?,
                    ..*self
                };
                bumped.price(rate)
            },
            |f| first_central(f, self.model.vol, config.vol_bump),
        )
    }

    /// ∂V/∂t: expiry and maturity both move closer by the elapsed time.
    ///
    /// Near expiry the dates are only pushed outward (backward difference).
    ///
    /// # Errors
    /// As for [`CirBondOption::delta`].
    pub fn theta(&self, rate: T, config: &GreeksConfig<T>) -> Result<T, PricingError> {
        config.validate()?;
        let h = config.time_bump;
        with_pricing_errors(
            |elapsed| {
                let shifted = Self {
                    expiry: self.expiry - elapsed,
                    maturity: self.maturity - elapsed,
                    ..*self
                };
                shifted.price(rate)
            },
            |f| {
                if self.expiry < T::lit(0.5) * h {
                    first_backward(f, T::zero(), h)
                } else {
                    first_central(f, T::zero(), h)
                }
            },
        )
    }
}
