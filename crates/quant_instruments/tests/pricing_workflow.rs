//! End-to-end pricing workflows through the public API.
//!
//! Reference prices were computed independently from the closed forms with
//! exact special functions; tolerances reflect the quadrature and erf
//! approximations used by `quant_math`.

use approx::assert_abs_diff_eq;
use quant_instruments::bond_option::CirBondOption;
use quant_instruments::bonds::{BondPricer, Cir, Vasicek, ZeroCouponBondPricer};
use quant_instruments::error::PricingError;
use quant_instruments::european::{
    AbsoluteCev, BlackScholes, EuropeanOptionPricer, EuropeanPricer, GeneralCev, MonteCarloConfig,
    MonteCarloPricer, OptionKind, OptionState,
};
use quant_instruments::greeks::GreeksConfig;
use quant_math::types::MathError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ========================================
// European options
// ========================================

#[test]
fn test_models_agree_where_they_should() {
    init_tracing();
    let state = OptionState::new(100.0_f64, 1.0, 0.05, 0.2).unwrap();
    let bs = BlackScholes::new(100.0, OptionKind::Call).unwrap().price(&state).unwrap();

    let mc = MonteCarloPricer::new(
        100.0,
        OptionKind::Call,
        MonteCarloConfig::builder().n_trials(100_000).seed(2024).build().unwrap(),
    )
    .unwrap()
    .price(&state)
    .unwrap();
    assert!((mc - bs).abs() < 0.25, "mc {} vs bs {}", mc, bs);

    // Square-root CEV with the same local volatility at the money
    let cev = GeneralCev::new(100.0, OptionKind::Call, 1.0)
        .unwrap()
        .price(&state.with_vol(2.0))
        .unwrap();
    assert_abs_diff_eq!(cev, 10.453_885_3, epsilon = 1e-4);
    assert!((cev - bs).abs() < 0.01);
}

#[test]
fn test_runtime_model_selection() {
    let state = OptionState::new(20.0_f64, 4.0 / 12.0, 0.05, 4.0).unwrap();
    let pricers = [
        (
            EuropeanPricer::AbsoluteCev(AbsoluteCev::new(20.0, OptionKind::Call).unwrap()),
            1.088_479_525_3,
        ),
        (
            EuropeanPricer::GeneralCev(GeneralCev::new(20.0, OptionKind::Call, 1e-6).unwrap()),
            1.088_479_525_3,
        ),
    ];
    for (pricer, expected) in pricers {
        assert_abs_diff_eq!(pricer.price(&state).unwrap(), expected, epsilon = 1e-3);
    }
}

#[test]
fn test_implied_vol_round_trip_across_models() {
    let state = OptionState::new(100.0_f64, 0.75, 0.03, 0.25).unwrap();
    let models = [
        EuropeanPricer::BlackScholes(BlackScholes::new(95.0, OptionKind::Put).unwrap()),
        EuropeanPricer::AbsoluteCev(AbsoluteCev::new(95.0, OptionKind::Call).unwrap()),
    ];
    for model in models {
        let target_vol = match model {
            EuropeanPricer::AbsoluteCev(_) => 5.0,
            _ => 0.25,
        };
        let price = model.price(&state.with_vol(target_vol)).unwrap();
        let vol = model.implied_vol(price, &state).unwrap();
        assert_abs_diff_eq!(vol, target_vol, epsilon = 1e-3);
    }
}

#[test]
fn test_implied_vol_errors_are_typed() {
    let bs = BlackScholes::new(100.0_f64, OptionKind::Call).unwrap();
    let state = OptionState::new(100.0, 1.0, 0.05, 0.2).unwrap();
    match bs.implied_vol(1_000.0, &state).unwrap_err() {
        PricingError::Math(MathError::Domain { context, .. }) => {
            assert_eq!(context, "implied volatility");
        }
        other => panic!("Expected Math(Domain), got {:?}", other),
    }
}

#[test]
fn test_fd_greeks_for_every_closed_form() {
    let config = GreeksConfig::default();
    let state = OptionState::new(100.0_f64, 1.0, 0.05, 0.2).unwrap();
    let call = BlackScholes::new(100.0, OptionKind::Call).unwrap();
    let put = BlackScholes::new(100.0, OptionKind::Put).unwrap();
    let gc = call.greeks(&state, &config).unwrap();
    let gp = put.greeks(&state, &config).unwrap();
    // Delta parity and shared gamma/vega
    assert_abs_diff_eq!(gc.delta - gp.delta, 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(gc.gamma, gp.gamma, epsilon = 1e-5);
    assert_abs_diff_eq!(gc.vega, gp.vega, epsilon = 1e-3);

    let cev_state = OptionState::new(20.0_f64, 0.5, 0.05, 4.0).unwrap();
    let cev = AbsoluteCev::new(20.0, OptionKind::Call).unwrap();
    let g = cev.greeks(&cev_state, &config).unwrap();
    assert!(g.delta > 0.0 && g.delta < 1.0);
    assert!(g.gamma > 0.0);
    assert!(g.vega > 0.0);
}

// ========================================
// Bonds and bond options
// ========================================

#[test]
fn test_bond_pricers() {
    init_tracing();
    let vasicek = ZeroCouponBondPricer::Vasicek(Vasicek::new(0.3_f64, 0.04, 0.01).unwrap());
    let cir = ZeroCouponBondPricer::Cir(Cir::new(0.3_f64, 0.04, 0.05).unwrap());
    assert_abs_diff_eq!(vasicek.price(0.05, 10.0).unwrap(), 0.651_346_262_3, epsilon = 1e-9);
    assert_abs_diff_eq!(cir.price(0.05, 10.0).unwrap(), 0.651_528_099_3, epsilon = 1e-9);
    assert_eq!(vasicek.price(0.05, 0.0).unwrap(), 1.0);
}

#[test]
fn test_bond_option_bounds() {
    let model = Cir::new(0.5_f64, 0.05, 0.1).unwrap();
    let bond = model.price(0.05, 5.0).unwrap();
    for strike in [0.6, 0.7, 0.8, 0.9] {
        let call = CirBondOption::new(model, strike, 1.0, 5.0, OptionKind::Call)
            .unwrap()
            .price(0.05)
            .unwrap();
        let lower = (bond - strike * model.price(0.05, 1.0).unwrap()).max(0.0);
        assert!(call >= lower - 1e-9, "strike {}: {} < {}", strike, call, lower);
        assert!(call <= bond);
    }
}

#[test]
fn test_bond_option_call_decreases_with_strike() {
    let model = Cir::new(0.5_f64, 0.05, 0.1).unwrap();
    let prices: Vec<f64> = [0.6, 0.7, 0.8, 0.9]
        .iter()
        .map(|&k| {
            CirBondOption::new(model, k, 1.0, 5.0, OptionKind::Call)
                .unwrap()
                .price(0.05)
                .unwrap()
        })
        .collect();
    assert!(prices.windows(2).all(|w| w[0] > w[1]));
}
