// ─────────────────────────────────────────────────────────────────────
// SCPN Cluster Dynamics — Formation-Energy Fits
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Legendre-polynomial fit of the He_x V_y formation-energy surface in
//! tungsten. Small vacancy numbers (V <= 2) use tabulated DFT values;
//! larger clusters evaluate a 2D fit in the He/V ratio and the vacancy
//! number, with separate coefficient sets below and above V = 27.

/// c_0..c_3 coefficient tables for the low-V fit (V <= 27).
const C0_LOW: [f64; 6] = [253.35, 435.36, 336.50, 198.92, 95.154, 21.544];
const C1_LOW: [f64; 6] = [493.29, 1061.3, 1023.9, 662.92, 294.24, 66.962];
const C2_LOW: [f64; 6] = [410.40, 994.89, 1044.6, 689.41, 286.52, 60.712];
const C3_LOW: [f64; 6] = [152.99, 353.16, 356.10, 225.75, 87.077, 15.640];

/// c_0..c_3 coefficient tables for the high-V fit (V > 27).
const C0_HIGH: [f64; 6] = [-847.90, -3346.9, -4510.3, -3094.7, -971.18, -83.770];
const C1_HIGH: [f64; 6] = [-1589.3, -4894.6, -6001.8, -4057.5, -1376.4, -161.91];
const C2_HIGH: [f64; 6] = [834.91, 1981.8, 1885.7, 1027.1, 296.69, 29.902];
const C3_HIGH: [f64; 6] = [1547.2, 3532.3, 3383.6, 1969.2, 695.17, 119.23];

/// Tabulated formation energies for He_x V_1, x = 1..14.
const HE_V1: [f64; 14] = [
    5.14166, 8.20919, 11.5304, 14.8829, 18.6971, 22.2847, 26.3631, 30.1049, 34.0081, 38.2069,
    42.4217, 46.7378, 51.1551, 55.6738,
];

/// Tabulated formation energies for He_x V_2, x = 1..18.
const HE_V2: [f64; 18] = [
    7.10098, 8.39913, 9.41133, 11.8748, 14.8296, 17.7259, 20.7747, 23.7993, 26.7984, 30.0626,
    33.0385, 36.5173, 39.9406, 43.48, 46.8537, 50.4484, 54.0879, 57.7939,
];

/// Evaluates `sum_i c_i P_i(x)` with the Bonnet recurrence.
pub fn legendre_sum(x: f64, coefficients: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut p_prev = 1.0;
    let mut p = x;
    for (n, &c) in coefficients.iter().enumerate() {
        let p_n = match n {
            0 => 1.0,
            1 => x,
            _ => {
                let k = (n - 1) as f64;
                let next = ((2.0 * k + 1.0) * x * p - k * p_prev) / (k + 1.0);
                p_prev = p;
                p = next;
                next
            }
        };
        sum += c * p_n;
    }
    sum
}

/// Formation energy of He_x V_y in eV. Returns negative infinity when
/// the composition falls outside the fitted and tabulated ranges; the
/// rate layer treats that sentinel as a disabled dissociation channel.
pub fn he_v_formation_energy(num_he: u32, num_v: u32) -> f64 {
    if num_v > 2 {
        let x = 2.0 * ((f64::from(num_he) / f64::from(num_v)) / 9.0) - 1.0;
        let (y, c) = if num_v <= 27 {
            let y = 2.0 * ((f64::from(num_v) - 1.0) / 26.0) - 1.0;
            (y, [&C0_LOW, &C1_LOW, &C2_LOW, &C3_LOW])
        } else {
            let y = 2.0 * ((f64::from(num_v) - 1.0) / 451.0) - 1.0;
            (y, [&C0_HIGH, &C1_HIGH, &C2_HIGH, &C3_HIGH])
        };
        let coefficients = [
            legendre_sum(x, c[0]),
            legendre_sum(x, c[1]),
            legendre_sum(x, c[2]),
            legendre_sum(x, c[3]),
        ];
        return legendre_sum(y, &coefficients);
    }
    match (num_v, num_he) {
        (1, 1..=14) => HE_V1[num_he as usize - 1],
        (2, 1..=18) => HE_V2[num_he as usize - 1],
        _ => f64::NEG_INFINITY,
    }
}
