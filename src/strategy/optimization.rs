// src/strategy/optimization.rs

/// Module for the service-level side of the (Q, r) calculation.
///
/// Turns a target probability of not stocking out during the lead time into
/// a z-score, and the z-score into safety stock and a reorder point.

/// Lowest and highest service level (as a fraction) fed to the quantile.
/// Keeps z finite when a table says 0% or 100%.
pub const SERVICE_LEVEL_FLOOR: f64 = 0.01;
pub const SERVICE_LEVEL_CEILING: f64 = 0.999;

/// Inverse Cumulative Distribution Function (Quantile function) for the
/// Standard Normal Distribution.
///
/// Rational approximation by P. J. Acklam, relative error below 1.15e-9 over
/// the whole open interval. `p = 0` and `p = 1` map to the infinities;
/// anything outside `[0, 1]` (or NaN) gives NaN.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_690e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_922_213e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_671_010_228_800,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;

    let tail = |q: f64| {
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        num / den
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

/// z-score for a service level given in percent (95.0 = 95%).
///
/// The level is clipped to [1%, 99.9%] first. A non-finite level gives NaN.
pub fn service_level_z(service_level_pct: f64) -> f64 {
    if !service_level_pct.is_finite() {
        return f64::NAN;
    }
    let p = (service_level_pct / 100.0).clamp(SERVICE_LEVEL_FLOOR, SERVICE_LEVEL_CEILING);
    inverse_normal_cdf(p)
}

/// Safety stock `z * sigma_L`.
///
/// Negative for service levels under 50%; the cost model charges such a
/// buffer as zero.
pub fn safety_stock(z: f64, sigma_l: f64) -> f64 {
    z * sigma_l
}

/// Reorder point `mu_L + SS`.
pub fn reorder_point(mu_l: f64, safety_stock: f64) -> f64 {
    mu_l + safety_stock
}
