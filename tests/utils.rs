pub fn assert_float_eq<T: num::Float + std::fmt::Display>(
    f1: T,
    f2: T,
    atol: T,
    rtol: T,
    msg: &str,
) {
    if (f1 - f2).abs() >= atol + rtol * f2.abs() {
        println!("Floats not almost equal. {}\nf1: {}\nf2: {}\n", msg, f1, f2);
        unreachable!();
    }
}

#[allow(dead_code)]
pub fn assert_float_eq_f32(f1: f32, f2: f32) {
    assert_float_eq(f1, f2, 1e-6, 1e-6, "");
}

#[allow(dead_code)]
pub fn assert_float_eq_f64(f1: f64, f2: f64) {
    assert_float_eq(f1, f2, 1e-12, 0.0, "");
}

/// Both values are the same number, the same infinity, or both are NaN.
#[allow(dead_code)]
pub fn assert_same_float(f1: f32, f2: f32, msg: &str) {
    if !(f1.to_bits() == f2.to_bits() || (f1.is_nan() && f2.is_nan())) {
        println!("Floats differ. {}\nf1: {}\nf2: {}\n", msg, f1, f2);
        unreachable!();
    }
}
