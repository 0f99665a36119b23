//! # **Math Module** - *Elementwise Numeric Functions*
//!
//! Free functions applying the usual transcendental and rounding operations
//! to a whole vector. Inputs convert through the float view first, so an
//! integer or boolean vector comes back as floats; complex vectors route
//! through the complex plane where the function is defined there. Inputs
//! with no numeric view yield an all-NA vector of the same length.

use num_complex::Complex64;

use crate::enums::ops::Applier;
use crate::enums::payload::PayloadType;
use crate::structs::vector::Vector;

fn unary_float(vec: &Vector, f: impl Fn(f64) -> f64) -> Vector {
    let floats = vec.as_float();
    floats.apply(&Applier::float(&|v: &f64, na| (f(*v), na)))
}

fn unary(
    vec: &Vector,
    float_fn: impl Fn(f64) -> f64,
    complex_fn: impl Fn(Complex64) -> Complex64,
) -> Vector {
    if vec.type_tag() == PayloadType::Complex {
        vec.apply(&Applier::complex(&|v: &Complex64, na| (complex_fn(*v), na)))
    } else {
        unary_float(vec, float_fn)
    }
}

pub fn sin(vec: &Vector) -> Vector {
    unary(vec, f64::sin, Complex64::sin)
}

pub fn cos(vec: &Vector) -> Vector {
    unary(vec, f64::cos, Complex64::cos)
}

pub fn tan(vec: &Vector) -> Vector {
    unary(vec, f64::tan, Complex64::tan)
}

pub fn exp(vec: &Vector) -> Vector {
    unary(vec, f64::exp, Complex64::exp)
}

pub fn ln(vec: &Vector) -> Vector {
    unary(vec, f64::ln, Complex64::ln)
}

pub fn log10(vec: &Vector) -> Vector {
    unary(vec, f64::log10, |c| c.ln() / std::f64::consts::LN_10)
}

pub fn sqrt(vec: &Vector) -> Vector {
    unary(vec, f64::sqrt, Complex64::sqrt)
}

/// Absolute value; for complex input this is the modulus, so the result is
/// a float vector.
pub fn abs(vec: &Vector) -> Vector {
    if vec.type_tag() == PayloadType::Complex {
        let floats = match vec.complexes() {
            Some((data, na)) => {
                let norms = data.iter().map(|c| c.norm()).collect();
                Vector::float_with_na(norms, na).named(vec.name().to_string())
            }
            None => Vector::na_vector(vec.len()),
        };
        return floats;
    }
    unary_float(vec, f64::abs)
}

/// Rounding operations use the float view even for complex input.
pub fn ceil(vec: &Vector) -> Vector {
    unary_float(vec, f64::ceil)
}

pub fn floor(vec: &Vector) -> Vector {
    unary_float(vec, f64::floor)
}

pub fn round(vec: &Vector) -> Vector {
    unary_float(vec, f64::round)
}

pub fn pow(vec: &Vector, exponent: f64) -> Vector {
    unary(vec, |v| v.powf(exponent), |c| c.powf(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn test_ceil_on_integer_with_na() {
        let v = Vector::integer_with_na(vec![1, 2, 3], vec![false, true, false]);
        let out = ceil(&v);
        assert_eq!(out.type_tag(), PayloadType::Float);
        let (data, na) = out.floats().unwrap();
        assert_eq!(data[0], 1.0);
        assert_eq!(data[2], 3.0);
        assert_eq!(na, vec![false, true, false]);
    }

    #[test]
    fn test_sqrt_floats() {
        let v = Vector::float(vec![4.0, 9.0]);
        assert_eq!(sqrt(&v).floats().unwrap().0, vec![2.0, 3.0]);
    }

    #[test]
    fn test_sqrt_complex_stays_complex() {
        let v = Vector::complex(vec![Complex64::new(-1.0, 0.0)]);
        let out = sqrt(&v);
        assert_eq!(out.type_tag(), PayloadType::Complex);
        let c = out.complexes().unwrap().0[0];
        assert!((c.im - 1.0).abs() < 1e-12 && c.re.abs() < 1e-12);
    }

    #[test]
    fn test_abs_complex_is_modulus() {
        let v = Vector::complex(vec![Complex64::new(3.0, 4.0)]);
        let out = abs(&v);
        assert_eq!(out.type_tag(), PayloadType::Float);
        assert_eq!(out.floats().unwrap().0, vec![5.0]);
    }

    #[test]
    fn test_pow() {
        let v = Vector::integer(vec![2, 3]);
        assert_eq!(pow(&v, 2.0).floats().unwrap().0, vec![4.0, 9.0]);
    }

    #[test]
    fn test_incompatible_input_is_all_na() {
        let v = Vector::time(vec![OffsetDateTime::UNIX_EPOCH, OffsetDateTime::UNIX_EPOCH]);
        let out = sin(&v);
        assert_eq!(out.len(), 2);
        assert_eq!(out.is_na(), vec![true, true]);
    }
}
